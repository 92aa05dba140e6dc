use crate::errors::AppError;
use crate::records::{Record, StoreKind};
use crate::render;

pub fn export_json(records: &[Record]) -> Result<String, AppError> {
    serde_json::to_string_pretty(records).map_err(AppError::internal)
}

/// Quotes a field when it would otherwise break the column grid. The
/// original site joined raw values with commas and let embedded commas
/// shift every following column; that defect is fixed here.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| csv_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// CSV snapshot of a store in insertion order, with the store's fixed
/// column header.
pub fn export_csv(kind: StoreKind, records: &[Record]) -> String {
    let mut out = csv_line(render::columns(kind).iter().copied());
    out.push('\n');
    for record in records {
        out.push_str(&csv_line(render::record_cells(record)));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CalorieItem, RecordFields};
    use crate::store::RecordStore;

    fn item(name: &str, total: f64) -> RecordFields {
        RecordFields::CalorieItem(CalorieItem {
            name: name.to_string(),
            cal_per_serving: total,
            servings: 1.0,
            total,
        })
    }

    #[test]
    fn csv_quotes_embedded_commas() {
        let mut store = RecordStore::new(StoreKind::CalorieData);
        store.add(item("Rice, fried", 450.0), 1);

        let csv = export_csv(StoreKind::CalorieData, store.all());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Food,Calories per Serving,Servings,Total Calories"
        );
        assert_eq!(lines.next().unwrap(), "\"Rice, fried\",450,1,450.0");
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn json_export_round_trips() {
        let mut store = RecordStore::new(StoreKind::CalorieData);
        store.add(item("Oatmeal", 300.0), 1);
        store.add(item("Banana", 105.0), 2);

        let json = export_json(store.all()).unwrap();
        let parsed: Vec<Record> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store.all());
    }
}
