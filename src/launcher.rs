use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::LaunchError;
use crate::keywords;
use crate::search::{Opener, SearchRequest};

/// How keywords are picked out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The first `lines` raw lines, headings and bullets included.
    Prefix { lines: usize },
    /// Entries of one `## <name>` section, at most `max_terms` of them.
    Section { name: String, max_terms: usize },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Prefix {
            lines: keywords::DEFAULT_LINE_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryLauncher {
    keywords: PathBuf,
    selection: Selection,
}

impl QueryLauncher {
    pub fn new(keywords: impl Into<PathBuf>, selection: Selection) -> Self {
        Self {
            keywords: keywords.into(),
            selection,
        }
    }

    pub fn query(&self) -> Result<String, LaunchError> {
        match &self.selection {
            Selection::Prefix { lines } => keywords::prefix_query(&self.keywords, *lines),
            Selection::Section { name, max_terms } => {
                keywords::section_query(&self.keywords, name, *max_terms)
            }
        }
    }

    pub fn prepare(&self) -> Result<SearchRequest, LaunchError> {
        let query = self.query()?;
        if query.is_empty() {
            warn!(path = %self.keywords.display(), "keyword file produced an empty query");
        }
        Ok(SearchRequest::scholar(query))
    }

    /// Echoes the query to `out`, then hands the URL to `opener`.
    ///
    /// Nothing is opened unless the keyword file was read successfully.
    pub fn launch<W: Write>(
        &self,
        opener: &dyn Opener,
        out: &mut W,
    ) -> anyhow::Result<SearchRequest> {
        let request = self.prepare()?;
        writeln!(out, "Query: {}", request.query)?;

        info!(url = %request.url, "opening search");
        opener.open(&request.url)?;
        Ok(request)
    }

    /// Prints the query and the URL without opening anything.
    pub fn dry_run<W: Write>(&self, out: &mut W) -> anyhow::Result<SearchRequest> {
        let request = self.prepare()?;
        writeln!(out, "Query: {}", request.query)?;
        writeln!(out, "URL: {}", request.url)?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) -> Result<(), LaunchError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct BrokenOpener;

    impl Opener for BrokenOpener {
        fn open(&self, _url: &str) -> Result<(), LaunchError> {
            Err(LaunchError::NoOpener)
        }
    }

    fn setup(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.md");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn launch_echoes_query_and_opens_url() {
        let (_dir, path) = setup("## English\nmould  yeast\nherbal\n");
        let opener = RecordingOpener::default();
        let mut out = Vec::new();

        let request = QueryLauncher::new(&path, Selection::default())
            .launch(&opener, &mut out)
            .unwrap();

        assert_eq!(request.query, "## English mould yeast herbal");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Query: ## English mould yeast herbal\n"
        );
        assert_eq!(*opener.opened.borrow(), vec![request.url.clone()]);
        assert_eq!(
            request.url,
            "https://scholar.google.com/scholar?q=%23%23%20English%20mould%20yeast%20herbal"
        );
    }

    #[test]
    fn missing_file_never_reaches_the_opener() {
        let dir = tempfile::tempdir().unwrap();
        let opener = RecordingOpener::default();
        let mut out = Vec::new();

        let err = QueryLauncher::new(dir.path().join("keywords.md"), Selection::default())
            .launch(&opener, &mut out)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LaunchError>(),
            Some(LaunchError::KeywordsUnreadable { .. })
        ));
        assert!(opener.opened.borrow().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn opener_failure_is_fatal() {
        let (_dir, path) = setup("a\nb\n");
        let err = QueryLauncher::new(&path, Selection::default())
            .launch(&BrokenOpener, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LaunchError>(),
            Some(LaunchError::NoOpener)
        ));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (_dir, path) = setup("Nấm mốc\ncontamination fongique\n");
        let launcher = QueryLauncher::new(&path, Selection::default());
        let opener = RecordingOpener::default();

        let first = launcher.launch(&opener, &mut Vec::new()).unwrap();
        let second = launcher.launch(&opener, &mut Vec::new()).unwrap();

        assert_eq!(first, second);
        let opened = opener.opened.borrow();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[0], opened[1]);
    }

    #[test]
    fn section_selection_uses_entries() {
        let (_dir, path) =
            setup("## English\n- aflatoxin\n- ochratoxin\n## Français\n- moisissure\n");
        let launcher = QueryLauncher::new(
            &path,
            Selection::Section {
                name: "français".to_string(),
                max_terms: 12,
            },
        );
        assert_eq!(launcher.query().unwrap(), "moisissure");
    }

    #[test]
    fn empty_file_still_opens_a_bare_search() {
        let (_dir, path) = setup("");
        let opener = RecordingOpener::default();
        let mut out = Vec::new();

        let request = QueryLauncher::new(&path, Selection::default())
            .launch(&opener, &mut out)
            .unwrap();

        assert_eq!(request.query, "");
        assert_eq!(request.url, "https://scholar.google.com/scholar?q=");
        assert_eq!(String::from_utf8(out).unwrap(), "Query: \n");
        assert_eq!(*opener.opened.borrow(), vec![request.url.clone()]);
    }

    #[test]
    fn dry_run_prints_url() {
        let (_dir, path) = setup("a\nb\nc");
        let mut out = Vec::new();
        QueryLauncher::new(&path, Selection::default())
            .dry_run(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Query: a b c\nURL: https://scholar.google.com/scholar?q=a%20b%20c\n"
        );
    }
}
