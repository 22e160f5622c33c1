use serde::Serialize;

use crate::error::MedFinderError;

pub(crate) fn to_pretty<T: Serialize>(value: &T) -> Result<String, MedFinderError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::to_pretty;
    use crate::entities::medicine::MedicineRecord;

    #[test]
    fn to_pretty_serializes_with_indentation() {
        let records = vec![MedicineRecord {
            name: "ibuprofen 200 MG Oral Tablet".to_string(),
            code: "310965".to_string(),
            brand: "Advil".to_string(),
        }];
        let json = to_pretty(&records).expect("json");
        assert!(json.contains('\n'));
        assert!(json.contains("\"name\": \"ibuprofen 200 MG Oral Tablet\""));
        assert!(json.contains("\"code\": \"310965\""));
        assert!(json.contains("\"brand\": \"Advil\""));
    }
}
