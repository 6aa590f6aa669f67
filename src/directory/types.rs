use serde::{Deserialize, Serialize};

/// A contact person at a client company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    /// decisor, influenciador or usuario
    pub contact_type: String,
}

/// Client record as stored by the client directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub company_name: String,
    pub business_area: String,
    pub company_size: String,
    pub location: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// The counterparty selected for a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    pub display_name: String,
}

impl ClientRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<&ClientRecord> for ClientRef {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: record.id.clone(),
            display_name: format!("{} ({})", record.company_name, record.business_area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_record_deserialization() {
        let json = r#"{
            "id": "c-1",
            "company_name": "Construtora Alfa",
            "business_area": "Construção civil",
            "company_size": "Média",
            "location": "São Paulo",
            "contacts": [{
                "id": "p-1",
                "name": "Maria",
                "role": "Diretora",
                "phone": "11 99999-0000",
                "contact_type": "decisor"
            }],
            "created_at": "2025-01-10T12:00:00Z"
        }"#;

        let record: ClientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.company_name, "Construtora Alfa");
        assert_eq!(record.contacts.len(), 1);
        assert_eq!(record.contacts[0].contact_type, "decisor");
    }

    #[test]
    fn test_client_ref_display_name() {
        let record = ClientRecord {
            id: "c-2".to_string(),
            company_name: "Beta Engenharia".to_string(),
            business_area: "Indústria".to_string(),
            company_size: "Grande".to_string(),
            location: "Campinas".to_string(),
            contacts: vec![],
        };

        let client = ClientRef::from(&record);
        assert_eq!(client.id, "c-2");
        assert_eq!(client.display_name, "Beta Engenharia (Indústria)");
    }
}
