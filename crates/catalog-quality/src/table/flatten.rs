use polars::prelude::*;

/// Flatten struct columns into dotted top-level columns.
///
/// `audio_features { energy, key }` becomes `audio_features.energy` and
/// `audio_features.key`, at the position the struct occupied. Nested structs
/// are flattened recursively. Frames without struct columns are returned as-is.
pub fn flatten_struct_columns(df: DataFrame) -> PolarsResult<DataFrame> {
    let has_struct = df
        .get_columns()
        .iter()
        .any(|column| matches!(column.dtype(), DataType::Struct(_)));
    if !has_struct {
        return Ok(df);
    }

    let mut flattened: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        flatten_into(
            column.as_materialized_series(),
            column.name().as_str(),
            &mut flattened,
        )?;
    }

    DataFrame::new(flattened)
}

fn flatten_into(series: &Series, name: &str, out: &mut Vec<Column>) -> PolarsResult<()> {
    match series.dtype() {
        DataType::Struct(_) => {
            for field in series.struct_()?.fields_as_series() {
                let nested_name = format!("{}.{}", name, field.name());
                flatten_into(&field, &nested_name, out)?;
            }
        }
        _ => out.push(Column::from(series.clone().with_name(name.into()))),
    }
    Ok(())
}
