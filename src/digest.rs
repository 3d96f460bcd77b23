//! # Digest builder
//!
//! Turns the ordered [`VisibilityRow`]s of one run into something a person reads:
//!
//! * an HTML page rendered with [`minijinja`], the built-in template being
//!   `templates/email.html`,
//! * a console table rendered with [`comfy-table`](comfy_table).
//!
//! A digest only exists for a non-empty row list; [`Digest::build`] returns `None`
//! otherwise and nothing is dispatched.
//!
//! Template context
//! -----------------
//! | Key | Content |
//! |-----|---------|
//! | `city` | display name of the site |
//! | `date` | `Oct 14, 2026` |
//! | `start_time` | clock label of the reference instant |
//! | `end_time` | clock label of the end of the announced window |
//! | `digest_html` | the `<table>` of rows, inserted without escaping |
//! | `rows` | the rows themselves (`name`, `rise`, `set`) for custom templates |
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Row, Table};
use hifitime::Duration;
use minijinja::{context, Environment, Value};
use serde::Serialize;

use crate::observers::ObserverSite;
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::Instant;
use crate::visibility::classifier::VisibilityRow;

/// Built-in page template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/email.html");

const TEMPLATE_NAME: &str = "digest.html";

#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub subject: String,
    pub site_name: String,
    pub generated_at: Instant,
    pub window_end: Instant,
    pub rows: Vec<VisibilityRow>,
}

#[derive(Serialize)]
struct RowContext<'a> {
    name: &'a str,
    rise: &'a str,
    set: &'a str,
}

impl Digest {
    /// Assemble the digest of a run.
    ///
    /// Arguments
    /// ---------
    /// * `site`: the observer, for the header.
    /// * `now`: reference instant of the run.
    /// * `window`: length of the announced window (24 hours by default).
    /// * `rows`: classified rows, already ordered.
    ///
    /// Return
    /// ------
    /// * `None` when `rows` is empty.
    pub fn build(
        site: &ObserverSite,
        now: Instant,
        window: Duration,
        rows: Vec<VisibilityRow>,
    ) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Digest {
            subject: format!("Planets visible over the {} sky", site.display_name),
            site_name: site.display_name.clone(),
            generated_at: now,
            window_end: now + window,
            rows,
        })
    }

    /// The `<table>` fragment inserted in the page.
    pub fn table_html(&self) -> String {
        let mut html = String::from(
            "<table style='width:100%;font-size:14px;border-collapse:collapse;'>",
        );
        html.push_str(
            "<tr><th align='left'>Planet</th><th align='left'>Rises</th><th align='left'>Sets</th></tr>",
        );
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.name, row.rise_display, row.set_display
            ));
        }
        html.push_str("</table>");
        html
    }

    /// Render the full HTML page.
    ///
    /// Arguments
    /// ---------
    /// * `template`: template source, or `None` for [`DEFAULT_TEMPLATE`].
    pub fn render_html(&self, template: Option<&str>) -> Result<String, PlanetAlertError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE))?;

        let rows: Vec<RowContext> = self
            .rows
            .iter()
            .map(|row| RowContext {
                name: &row.name,
                rise: &row.rise_display,
                set: &row.set_display,
            })
            .collect();

        let html = env.get_template(TEMPLATE_NAME)?.render(context! {
            city => self.site_name,
            date => self.generated_at.date_label(),
            start_time => self.generated_at.clock_label(),
            end_time => self.window_end.clock_label(),
            digest_html => Value::from_safe_string(self.table_html()),
            rows => rows,
        })?;
        Ok(html)
    }

    /// Console table: Planet / Rises / Sets.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![Cell::new("Planet"), Cell::new("Rises"), Cell::new("Sets")]);
        for row in &self.rows {
            table.add_row(Row::from(vec![
                Cell::new(&row.name),
                Cell::new(&row.rise_display),
                Cell::new(&row.set_display),
            ]));
        }
        table
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.subject)?;
        writeln!(
            f,
            "{} · {} to {}",
            self.generated_at.date_label(),
            self.generated_at.clock_label(),
            self.window_end.clock_label()
        )?;
        write!(f, "{}", self.table())
    }
}
