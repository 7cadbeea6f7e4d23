pub mod command;
pub mod run;

pub use run::run_app;

use crate::domain::{Contact, FormField};

pub fn display_contact(index: usize, contact: &Contact) -> String {
    format!(
        "{index:>3}. {:<24} {:12} {:12} {:>4}  {}",
        contact.full_name,
        contact.phone,
        contact.cell,
        contact.age,
        contact.id.as_deref().unwrap_or("-")
    )
}

pub fn display_form_field(field: &FormField) -> String {
    let marker = if field.required { "*" } else { " " };
    format!(
        "{marker} {:<20} {:<8} {}",
        field.name, field.field_type, field.label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_row_shows_dash_without_id() {
        let contact = Contact {
            full_name: "Ada Obi".to_string(),
            phone: "0801234567".to_string(),
            cell: "0907654321".to_string(),
            age: 34,
            ..Default::default()
        };

        let row = display_contact(1, &contact);

        assert!(row.starts_with("  1. Ada Obi"));
        assert!(row.ends_with("  -"));
    }
}
