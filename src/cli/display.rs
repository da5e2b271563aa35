use crate::error::{FormErrors, UnitOutcome};
use crate::models::{filter_units, Group, Person, ResponsibleDraft, Unit};

use super::ui::truncate;

/// One line per group: id, name, unit count.
pub fn group_line(group: &Group) -> String {
    let count = group.units.len();
    let units = if count == 1 { "unit" } else { "units" };
    format!("{:>6}  {}  ({} {})", group.groupe_id, truncate(&group.groupe_name, 40), count, units)
}

pub fn print_group_list(groups: &[&Group]) {
    if groups.is_empty() {
        println!("No customers found.");
        return;
    }
    for group in groups {
        println!("{}", group_line(group));
    }
    println!("\n{} customer(s)", groups.len());
}

/// Group header, logo sources and its units, optionally filtered by unit name.
pub fn print_complete_group(group: &Group, unit_filter: &str) {
    println!("{}\n", group.groupe_name);

    let description = group.description();
    if !description.is_empty() {
        println!("  {}", description);
    }

    let logo = group.logo_sources();
    println!("  logo {} ({})", logo.clearbit_url, logo.fallback_category);

    let units = filter_units(&group.units, unit_filter);
    println!("\nUnits ({})", units.len());
    if units.is_empty() {
        println!("  No units.");
    }
    for unit in units {
        println!("  {}", unit_line(unit));
    }
}

pub fn unit_line(unit: &Unit) -> String {
    let mut line = format!("{:>6}  {}", unit.unit_id, unit.unit_name);
    if let Some(location) = unit.location() {
        line.push_str(&format!("  {}", location));
    }
    if let Some(person) = &unit.responsible {
        line.push_str(&format!("  [{}]", person.full_name()));
    }
    line
}

pub fn print_unit(unit: &Unit) {
    println!("{}\n", unit.unit_name);
    if let Some(location) = unit.location() {
        println!("  {}", location);
    }
    if let Some(zone) = unit.zone_name.as_deref().filter(|z| !z.is_empty()) {
        println!("  zone {}", zone);
    }
    match &unit.responsible {
        Some(person) => print_person_card(person),
        None => println!("\n  No responsible person."),
    }
}

fn print_person_card(person: &Person) {
    println!("\n  {}", person.full_name());
    let mut detail = Vec::new();
    if let Some(title) = person.job_title.as_deref().filter(|t| !t.is_empty()) {
        detail.push(title);
    }
    detail.push(person.role.as_str());
    println!("  {}", detail.join(" • "));
    for contact in [person.email.as_deref(), person.phone_number.as_deref()]
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
    {
        println!("  {}", contact);
    }
}

/// Short description of a unit's responsible snapshot, if one is assigned.
pub fn responsible_summary(responsible: &ResponsibleDraft) -> Option<String> {
    if !responsible.is_assigned() {
        return None;
    }
    let mut parts = vec![responsible.full_name()];
    if !responsible.job_title.is_empty() {
        parts.push(responsible.job_title.clone());
    }
    if !responsible.role.is_empty() {
        parts.push(responsible.role.clone());
    }
    Some(parts.join(" • "))
}

pub fn print_persons(persons: &[Person], domain: &str) {
    if persons.is_empty() {
        println!("No persons found with @{} email", domain);
        return;
    }
    for person in persons {
        let email = person.email.as_deref().unwrap_or("");
        println!("{:>6}  {}  {}", person.person_id, person.picker_label(), email);
    }
}

pub fn print_form_errors(errors: &FormErrors) {
    for (_, message) in errors.iter() {
        eprintln!("  ! {}", message);
    }
}

pub fn print_outcomes(outcomes: &[UnitOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(unit_id) => println!("  {} {} ({}): ok", outcome.action, outcome.unit_name, unit_id),
            Err(message) => println!("  {} {}: {}", outcome.action, outcome.unit_name, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(units: usize) -> Group {
        let units: Vec<serde_json::Value> = (0..units)
            .map(|i| serde_json::json!({"unit_id": i, "unit_name": format!("U{}", i)}))
            .collect();
        let json = serde_json::json!({
            "groupe_id": 42,
            "groupe_name": "Acme",
            "units": units,
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_group_line() {
        assert_eq!(group_line(&group(1)), "    42  Acme  (1 unit)");
        assert_eq!(group_line(&group(3)), "    42  Acme  (3 units)");
    }

    #[test]
    fn test_unit_line() {
        let unit: Unit = serde_json::from_value(serde_json::json!({
            "unit_id": 5,
            "unit_name": "Lyon",
            "city": "Lyon",
            "country": "France",
            "responsible": {"Person_id": 1, "first_name": "Ada", "last_name": "Byron"},
        }))
        .unwrap();
        assert_eq!(unit_line(&unit), "     5  Lyon  Lyon, France  [Ada Byron]");
    }

    #[test]
    fn test_responsible_summary() {
        let mut responsible = ResponsibleDraft::default();
        assert_eq!(responsible_summary(&responsible), None);

        responsible.person_id = Some(1);
        responsible.first_name = "Ada".to_string();
        responsible.last_name = "Byron".to_string();
        responsible.job_title = "Buyer".to_string();
        assert_eq!(
            responsible_summary(&responsible).as_deref(),
            Some("Ada Byron • Buyer • Contact")
        );
    }
}
