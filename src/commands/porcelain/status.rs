use crate::areas::repository::Repository;
use colored::Colorize;
use std::fmt::Display;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let info = self.working_status().initialize()?;
        let refs = &self.state().refs;

        let branches = refs.list_branches().map(|(name, _)| {
            if refs.is_current_branch(name) {
                format!("*{}", name).green().to_string()
            } else {
                name.to_string()
            }
        });
        self.print_section("Branches", branches)?;

        self.print_section(
            "Staged Files",
            info.staged_files.iter().map(|path| path.display()),
        )?;
        self.print_section(
            "Removed Files",
            info.removed_files.iter().map(|path| path.display()),
        )?;
        self.print_section(
            "Modifications Not Staged For Commit",
            info.workspace_changeset
                .iter()
                .map(|(path, change)| format!("{} {}", path.display(), change)),
        )?;
        self.print_section(
            "Untracked Files",
            info.untracked_files.iter().map(|path| path.display()),
        )?;

        Ok(())
    }

    fn print_section<T: Display>(
        &self,
        title: &str,
        lines: impl IntoIterator<Item = T>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {title} ===")?;
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
