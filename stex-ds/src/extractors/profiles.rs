//! Per-bank statement profiles
//!
//! One entry per supported institution. Keys are the stable identifiers
//! callers put in the `bank` field of POST /extract. Header cells are
//! matched case-insensitively against the export to find where transaction
//! data starts; `columns` are the output field names, one per header cell.

/// Shape of one bank's delimited statement export
pub struct StatementProfile {
    /// Stable bank key ("banco_galicia")
    pub key: &'static str,
    /// Institution display name
    pub label: &'static str,
    /// Field delimiter in the export
    pub delimiter: char,
    /// Header cells marking the start of transaction data
    pub header: &'static [&'static str],
    /// Output column names, one per header cell
    pub columns: &'static [&'static str],
    /// Indexes of columns parsed as amounts
    pub amount_columns: &'static [usize],
    /// True when amounts use comma decimals ("1.234,56")
    pub decimal_comma: bool,
}

pub static PROFILES: &[StatementProfile] = &[
    StatementProfile {
        key: "banco_galicia",
        label: "Banco Galicia",
        delimiter: ';',
        header: &["Fecha", "Descripción", "Origen", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "descripcion", "origen", "debito", "credito", "saldo"],
        amount_columns: &[3, 4, 5],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_nacion",
        label: "Banco de la Nación Argentina",
        delimiter: ';',
        header: &["Fecha", "Movimiento", "Importe", "Saldo"],
        columns: &["fecha", "movimiento", "importe", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_provincia",
        label: "Banco Provincia",
        delimiter: ';',
        header: &["Fecha", "Concepto", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "concepto", "debito", "credito", "saldo"],
        amount_columns: &[2, 3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_ciudad",
        label: "Banco Ciudad",
        delimiter: ';',
        header: &["Fecha", "Descripción", "Importe", "Saldo"],
        columns: &["fecha", "descripcion", "importe", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: true,
    },
    StatementProfile {
        key: "santander_rio",
        label: "Santander Río",
        delimiter: ';',
        header: &["Fecha", "Sucursal Origen", "Descripción", "Referencia", "Importe", "Saldo"],
        columns: &["fecha", "sucursal_origen", "descripcion", "referencia", "importe", "saldo"],
        amount_columns: &[4, 5],
        decimal_comma: true,
    },
    StatementProfile {
        key: "bbva_frances",
        label: "BBVA Francés",
        delimiter: ';',
        header: &["Fecha", "Concepto", "Fecha valor", "Importe", "Saldo"],
        columns: &["fecha", "concepto", "fecha_valor", "importe", "saldo"],
        amount_columns: &[3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_macro",
        label: "Banco Macro",
        delimiter: ',',
        header: &["Fecha", "Descripción", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "descripcion", "debito", "credito", "saldo"],
        amount_columns: &[2, 3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "hsbc",
        label: "HSBC Argentina",
        delimiter: ',',
        header: &["Fecha", "Detalle", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "detalle", "debito", "credito", "saldo"],
        amount_columns: &[2, 3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "icbc",
        label: "ICBC Argentina",
        delimiter: ';',
        header: &["Fecha", "Descripción", "Comprobante", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "descripcion", "comprobante", "debito", "credito", "saldo"],
        amount_columns: &[3, 4, 5],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_patagonia",
        label: "Banco Patagonia",
        delimiter: ';',
        header: &["Fecha", "Concepto", "Referencia", "Importe", "Saldo"],
        columns: &["fecha", "concepto", "referencia", "importe", "saldo"],
        amount_columns: &[3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_supervielle",
        label: "Banco Supervielle",
        delimiter: ';',
        header: &["Fecha", "Movimiento", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "movimiento", "debito", "credito", "saldo"],
        amount_columns: &[2, 3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_credicoop",
        label: "Banco Credicoop",
        delimiter: ';',
        header: &["Fecha", "Concepto", "Débito", "Crédito", "Saldo"],
        columns: &["fecha", "concepto", "debito", "credito", "saldo"],
        amount_columns: &[2, 3, 4],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_comafi",
        label: "Banco Comafi",
        delimiter: ',',
        header: &["Fecha", "Descripción", "Importe", "Saldo"],
        columns: &["fecha", "descripcion", "importe", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: true,
    },
    StatementProfile {
        key: "banco_hipotecario",
        label: "Banco Hipotecario",
        delimiter: ';',
        header: &["Fecha", "Detalle", "Importe", "Saldo"],
        columns: &["fecha", "detalle", "importe", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: true,
    },
    StatementProfile {
        key: "itau",
        label: "Itaú Argentina",
        delimiter: ';',
        header: &["Fecha", "Descripción", "Importe", "Saldo"],
        columns: &["fecha", "descripcion", "importe", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: true,
    },
    // Fintech exports use plain CSV with dot decimals
    StatementProfile {
        key: "brubank",
        label: "Brubank",
        delimiter: ',',
        header: &["Fecha", "Descripción", "Categoría", "Monto"],
        columns: &["fecha", "descripcion", "categoria", "monto"],
        amount_columns: &[3],
        decimal_comma: false,
    },
    StatementProfile {
        key: "uala",
        label: "Ualá",
        delimiter: ',',
        header: &["Fecha", "Detalle", "Monto", "Saldo"],
        columns: &["fecha", "detalle", "monto", "saldo"],
        amount_columns: &[2, 3],
        decimal_comma: false,
    },
    StatementProfile {
        key: "mercado_pago",
        label: "Mercado Pago",
        delimiter: ',',
        header: &["Fecha", "Descripción", "Monto", "Saldo disponible"],
        columns: &["fecha", "descripcion", "monto", "saldo_disponible"],
        amount_columns: &[2, 3],
        decimal_comma: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_maps_header_cells_to_columns() {
        for profile in PROFILES {
            assert_eq!(
                profile.header.len(),
                profile.columns.len(),
                "profile {} has mismatched header/columns",
                profile.key
            );
            for index in profile.amount_columns {
                assert!(
                    *index < profile.columns.len(),
                    "profile {} has out-of-range amount column {}",
                    profile.key,
                    index
                );
            }
        }
    }
}
