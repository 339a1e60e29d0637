use chem_domain::{validate_id, ActionType, ChemicalRecord, ChemicalUpdate, ChemicalView, DomainError, NewChemical};
use chrono::{TimeZone, Utc};

fn water() -> ChemicalRecord {
    let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
    ChemicalRecord { id: 1,
                     name: "Water".into(),
                     cas_number: "7732-18-5".into(),
                     quantity: 100,
                     unit: "L".into(),
                     created_at: ts,
                     updated_at: ts }
}

#[test]
fn test_new_chemical_accepts_valid_fields() {
    let c = NewChemical::new("Water", "7732-18-5", 100, "L").unwrap();
    assert_eq!(c.name(), "Water");
    assert_eq!(c.quantity(), 100);
    // cantidad cero es válida
    assert!(NewChemical::new("Argon", "7440-37-1", 0, "m³").is_ok());
}

#[test]
fn test_new_chemical_rejects_invalid_fields() {
    assert!(matches!(NewChemical::new("", "7732-18-5", 1, "L"), Err(DomainError::ValidationError(_))));
    assert!(matches!(NewChemical::new("Water", "   ", 1, "L"), Err(DomainError::ValidationError(_))));
    assert!(matches!(NewChemical::new("Water", "7732-18-5", -1, "L"), Err(DomainError::ValidationError(_))));
    assert!(matches!(NewChemical::new("Water", "7732-18-5", 1, "millilitres"), Err(DomainError::ValidationError(_))));
    let long_name = "x".repeat(101);
    assert!(NewChemical::new(&long_name, "7732-18-5", 1, "L").is_err());
}

#[test]
fn test_update_applies_only_supplied_fields() {
    let mut record = water();
    let upd = ChemicalUpdate::new().quantity(80).unwrap();
    upd.apply_to(&mut record);
    assert_eq!(record.quantity, 80);
    assert_eq!(record.name, "Water");
    assert_eq!(record.unit, "L");
}

#[test]
fn test_update_rejects_empty_and_invalid() {
    assert!(ChemicalUpdate::new().ensure_not_empty().is_err());
    assert!(ChemicalUpdate::new().quantity(-5).is_err());
    assert!(ChemicalUpdate::new().unit("").is_err());
    let full = ChemicalUpdate::replace_all("Water", "7732-18-5", 50, "mL").unwrap();
    assert!(full.ensure_not_empty().is_ok());
    assert_eq!(full.unit_value(), Some("mL"));
}

#[test]
fn test_validate_id() {
    assert_eq!(validate_id(1).unwrap(), 1);
    assert!(validate_id(0).is_err());
    assert!(validate_id(-7).is_err());
}

#[test]
fn test_chemical_view_renders_contract_timestamps() {
    let view = ChemicalView::from(&water());
    assert_eq!(view.created_at, "05 Jan 2024 03:04 PM");
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["cas_number"], "7732-18-5");
    assert_eq!(json["updated_at"], "05 Jan 2024 03:04 PM");
}

#[test]
fn test_action_type_from_str() {
    assert_eq!("add".parse::<ActionType>().unwrap(), ActionType::Add);
    assert!("scrap".parse::<ActionType>().is_err());
}
