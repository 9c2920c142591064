use std::time::Duration;

const FILE_S: &str = " file(s)";

/// Aggregate tally for one batch run: four counters plus wall-clock time.
/// The counters always sum to the number of candidates the runner saw.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultReport {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub read_only: usize,
    pub elapsed: Duration,
}

impl ResultReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped + self.read_only
    }

    /// Human-readable summary, one line per counter plus elapsed seconds.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Successfully documented: {}{FILE_S}\n",
            self.succeeded
        ));
        out.push_str(&format!("Failed:                  {}{FILE_S}\n", self.failed));
        out.push_str(&format!("Skipped:                 {}{FILE_S}\n", self.skipped));
        out.push_str(&format!(
            "Read-only skipped:       {}{FILE_S}\n",
            self.read_only
        ));
        out.push_str(&format!(
            "Approximate time taken:  {}s\n",
            self.elapsed.as_secs()
        ));
        out
    }
}
