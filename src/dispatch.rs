//! Hand-off of a finished digest.
//!
//! A run produces at most one [`Digest`]; a [`DigestDispatcher`] decides where it
//! goes. Two dispatchers ship with the crate: the console and an HTML file.
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::digest::Digest;
use crate::planet_alert_errors::PlanetAlertError;

pub trait DigestDispatcher {
    fn dispatch(&self, digest: &Digest) -> Result<(), PlanetAlertError>;
}

/// Print subject and table on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDispatcher;

impl DigestDispatcher for ConsoleDispatcher {
    fn dispatch(&self, digest: &Digest) -> Result<(), PlanetAlertError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{digest}")?;
        info!(rows = digest.rows.len(), "digest printed");
        Ok(())
    }
}

/// Write the rendered HTML page to a file.
#[derive(Debug, Clone)]
pub struct HtmlFileDispatcher {
    path: Utf8PathBuf,
    template: Option<String>,
}

impl HtmlFileDispatcher {
    /// Arguments
    /// ---------
    /// * `path`: destination file, overwritten if it exists.
    /// * `template`: template source replacing the built-in page, if any.
    pub fn new(path: impl Into<Utf8PathBuf>, template: Option<String>) -> Self {
        HtmlFileDispatcher {
            path: path.into(),
            template,
        }
    }

    /// Same as [`HtmlFileDispatcher::new`], reading the template from a file.
    pub fn with_template_file(
        path: impl Into<Utf8PathBuf>,
        template_path: &Utf8Path,
    ) -> Result<Self, PlanetAlertError> {
        let template = std::fs::read_to_string(template_path)?;
        Ok(Self::new(path, Some(template)))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl DigestDispatcher for HtmlFileDispatcher {
    fn dispatch(&self, digest: &Digest) -> Result<(), PlanetAlertError> {
        let html = digest.render_html(self.template.as_deref())?;
        std::fs::write(&self.path, html)?;
        info!(
            path = %self.path,
            rows = digest.rows.len(),
            subject = %digest.subject,
            "digest written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod dispatch_test {
    use super::*;
    use crate::ephemeris::Body;
    use crate::observers::locations::resolve_location;
    use crate::time::Instant;
    use crate::visibility::classifier::{VisibilityCase, VisibilityRow, UNKNOWN_TIME};
    use hifitime::Unit;
    use std::collections::BTreeMap;

    fn digest() -> Digest {
        let site = resolve_location("riyadh", &BTreeMap::new()).unwrap();
        let now = Instant::parse("2026-10-14T20:00:00+03:00", site.time_zone).unwrap();
        let row = VisibilityRow {
            name: "Mars".into(),
            body: Body::Mars,
            case: VisibilityCase::UpInDarkness,
            rise: None,
            set: None,
            rise_display: UNKNOWN_TIME.into(),
            set_display: UNKNOWN_TIME.into(),
        };
        Digest::build(&site, now, Unit::Hour * 24_i64, vec![row]).unwrap()
    }

    #[test]
    fn test_html_file_dispatcher() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("digest.html")).unwrap();
        let dispatcher = HtmlFileDispatcher::new(path.clone(), None);
        dispatcher.dispatch(&digest()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Planets visible over the Riyadh sky"));
        assert!(html.contains("<td>Mars</td>"));
        assert!(html.contains("08:00 PM"));
    }

    #[test]
    fn test_html_file_dispatcher_with_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = Utf8PathBuf::from_path_buf(dir.path().join("t.html")).unwrap();
        std::fs::write(&template, "<h1>{{ city }}</h1>{{ digest_html }}").unwrap();
        let out = Utf8PathBuf::from_path_buf(dir.path().join("out.html")).unwrap();

        HtmlFileDispatcher::with_template_file(out.clone(), &template)
            .unwrap()
            .dispatch(&digest())
            .unwrap();
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.starts_with("<h1>Riyadh</h1><table"));
    }

    #[test]
    fn test_missing_template_file() {
        let err =
            HtmlFileDispatcher::with_template_file("out.html", Utf8Path::new("/nonexistent/t.html"))
                .unwrap_err();
        assert!(matches!(err, PlanetAlertError::IoError(_)));
    }

    #[test]
    fn test_unwritable_destination() {
        let dispatcher = HtmlFileDispatcher::new("/nonexistent/dir/digest.html", None);
        assert!(matches!(
            dispatcher.dispatch(&digest()),
            Err(PlanetAlertError::IoError(_))
        ));
    }
}
