//! Plain-text rendering of the controller state.

use std::fmt::Write;

use crate::controller::SpyCatController;
use crate::types::SpyCat;

pub const LOADING: &str = "Loading spy cats...";
pub const EMPTY_LIST: &str = "No spy cats yet.";

const HEADERS: [&str; 6] = ["ID", "Name", "Experience", "Breed", "Salary", "Actions"];

/// Render the whole page as text.
pub fn render(controller: &SpyCatController) -> String {
    if controller.is_loading() {
        return format!("{LOADING}\n");
    }

    let mut out = String::new();
    out.push_str("Spy Cat Agency\n");
    out.push_str("Manage your elite spy cats\n\n");

    if let Some(error) = controller.error() {
        let _ = writeln!(out, "[!] {error}\n");
    }

    render_form(controller, &mut out);
    out.push('\n');

    let cats = controller.cats();
    let _ = writeln!(out, "Active Spy Cats ({})", cats.len());
    if cats.is_empty() {
        let _ = writeln!(out, "{EMPTY_LIST}");
    } else {
        render_table(controller, &mut out);
    }
    out
}

fn render_form(controller: &SpyCatController, out: &mut String) {
    let form = controller.form();
    out.push_str("Add New Spy Cat\n");
    let _ = writeln!(out, "  Name: {}", form.name);
    let _ = writeln!(out, "  Years of Experience: {}", form.years_of_experience);
    let _ = writeln!(out, "  Breed: {}", form.breed);
    let _ = writeln!(out, "  Salary ($): {}", form.salary);
    if let Some(form_error) = controller.form_error() {
        let _ = writeln!(out, "  ! {form_error}");
    }
    let label = if controller.can_submit() {
        "Add Spy Cat"
    } else {
        "Adding..."
    };
    let _ = writeln!(out, "  [{label}]");
}

fn render_table(controller: &SpyCatController, out: &mut String) {
    let rows: Vec<[String; 6]> = controller
        .cats()
        .iter()
        .map(|cat| row(controller, cat))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        write_row(out, row, &widths);
    }
}

fn row(controller: &SpyCatController, cat: &SpyCat) -> [String; 6] {
    let editing = controller.editing().filter(|e| e.id == cat.id);
    let (salary, actions) = match editing {
        Some(edit) => {
            let confirm = if controller.can_confirm_edit() {
                "[Confirm]"
            } else {
                "(Confirm)"
            };
            (format!("> {} {confirm} [Discard]", edit.salary), String::new())
        }
        None => (format_salary(cat.salary), "[Edit] [Delete]".to_string()),
    };
    [
        cat.id.to_string(),
        cat.name.clone(),
        format!("{} years", cat.years_of_experience),
        cat.breed.clone(),
        salary,
        actions,
    ]
}

fn write_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// `$` amount with thousands separators and at most three decimals.
pub fn format_salary(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SpyCatClient;
    use crate::draft::DraftField;
    use crate::http::{HttpResponse, TransportError};

    fn controller_with(body: Result<&str, ()>) -> SpyCatController {
        let mut c = SpyCatController::new(SpyCatClient::new("http://cats.test"));
        let pending = c.begin_load();
        let outcome = match body {
            Ok(body) => Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: body.to_string(),
            }),
            Err(()) => Err(TransportError("refused".to_string())),
        };
        c.complete(pending.operation, outcome);
        c
    }

    #[test]
    fn loading_screen() {
        let c = SpyCatController::new(SpyCatClient::new("http://cats.test"));
        assert_eq!(render(&c), "Loading spy cats...\n");
    }

    #[test]
    fn empty_list_after_successful_load() {
        let text = render(&controller_with(Ok("[]")));
        assert!(text.contains("Active Spy Cats (0)"));
        assert!(text.contains(EMPTY_LIST));
        assert!(!text.contains("[!]"));
    }

    #[test]
    fn load_failure_shows_banner_and_empty_list() {
        let text = render(&controller_with(Err(())));
        assert!(text.contains("[!] Failed to load spy cats. Please try again."));
        assert!(text.contains(EMPTY_LIST));
    }

    #[test]
    fn table_lists_each_cat() {
        let body = r#"[{"id":7,"name":"Tom","years_of_experience":4,"breed":"Bengal","salary":52000}]"#;
        let text = render(&controller_with(Ok(body)));
        assert!(text.contains("Active Spy Cats (1)"));
        let line = text.lines().find(|l| l.starts_with("7 ")).unwrap();
        assert!(line.contains("Tom"));
        assert!(line.contains("4 years"));
        assert!(line.contains("Bengal"));
        assert!(line.contains("$52,000"));
        assert!(line.contains("[Edit] [Delete]"));
    }

    #[test]
    fn edited_row_shows_draft_and_disabled_confirm() {
        let body = r#"[{"id":7,"name":"Tom","years_of_experience":4,"breed":"Bengal","salary":52000}]"#;
        let mut c = controller_with(Ok(body));
        c.begin_edit(7);
        let line = render(&c).lines().find(|l| l.starts_with("7 ")).unwrap().to_string();
        assert!(line.contains("> 52000 (Confirm) [Discard]"));
        assert!(!line.contains("[Edit]"));

        c.set_edit_salary("53000");
        let line = render(&c).lines().find(|l| l.starts_with("7 ")).unwrap().to_string();
        assert!(line.contains("> 53000 [Confirm] [Discard]"));
    }

    #[test]
    fn add_label_tracks_the_create_in_flight() {
        let mut c = controller_with(Ok("[]"));
        c.set_form_field(DraftField::Name, "Tom");
        c.set_form_field(DraftField::YearsOfExperience, "1");
        c.set_form_field(DraftField::Breed, "Bengal");
        c.set_form_field(DraftField::Salary, "10");
        assert!(render(&c).contains("  [Add Spy Cat]"));

        let pending = c.begin_submit().unwrap();
        assert!(render(&c).contains("  [Adding...]"));

        let body = r#"{"id":1,"name":"Tom","years_of_experience":1,"breed":"Bengal","salary":10}"#;
        c.complete(
            pending.operation,
            Ok(HttpResponse {
                status: 201,
                headers: Vec::new(),
                body: body.to_string(),
            }),
        );
        assert!(render(&c).contains("  [Add Spy Cat]"));
    }

    #[test]
    fn salary_formatting() {
        assert_eq!(format_salary(0.0), "$0");
        assert_eq!(format_salary(999.0), "$999");
        assert_eq!(format_salary(1000.0), "$1,000");
        assert_eq!(format_salary(1234567.5), "$1,234,567.5");
        assert_eq!(format_salary(50000.125), "$50,000.125");
        assert_eq!(format_salary(0.1 + 0.2), "$0.3");
    }
}
