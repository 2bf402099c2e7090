use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// First-parent history of the current branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        for entry in RevList::new(self.database(), self.head_oid()?) {
            let (oid, commit) = entry?;
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the store, in id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().commit_ids()? {
            let commit = self.database().get_commit(&oid)?;
            self.show_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Ids of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        for oid in self.database().commit_ids()? {
            if self.database().get_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{oid}")?;
                matches.push(oid);
            }
        }

        if matches.is_empty() {
            anyhow::bail!(Error::NoMatch);
        }

        Ok(matches)
    }

    fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {oid}").yellow())?;
        if let [first, second, ..] = commit.parents() {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
