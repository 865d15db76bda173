use crate::areas::repository::Repository;
use crate::artifacts::status::report::StatusReport;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let report = StatusReport::compute(self, &index)?;

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        writeln!(writer, "*{}", report.current_branch)?;
        for branch in &report.other_branches {
            writeln!(writer, "{branch}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for filename in &report.staged_files {
            writeln!(writer, "{filename}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for filename in &report.removed_files {
            writeln!(writer, "{filename}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (filename, change) in &report.unstaged_changes {
            writeln!(writer, "{filename} ({change})")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for filename in &report.untracked_files {
            writeln!(writer, "{filename}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
