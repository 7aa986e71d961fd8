use std::fmt;

/// Counters from one harvest run.
#[derive(Debug, Default)]
pub struct HarvestStats {
    /// Parent entities walked (posts, products).
    pub parents: u32,
    /// Parent pipelines that errored out entirely (Site B products).
    pub parent_failures: u32,
    pub leaves_total: u32,
    pub leaves_succeeded: u32,
    pub leaves_failed: u32,
    /// Logical documents written (each lands on both raw and clean paths).
    pub docs_written: u32,
}

impl HarvestStats {
    pub fn merge(&mut self, other: HarvestStats) {
        self.parents += other.parents;
        self.parent_failures += other.parent_failures;
        self.leaves_total += other.leaves_total;
        self.leaves_succeeded += other.leaves_succeeded;
        self.leaves_failed += other.leaves_failed;
        self.docs_written += other.docs_written;
    }
}

impl fmt::Display for HarvestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Harvest Complete ===")?;
        writeln!(f, "Parents walked:   {}", self.parents)?;
        writeln!(f, "Parent failures:  {}", self.parent_failures)?;
        writeln!(f, "Leaves total:     {}", self.leaves_total)?;
        writeln!(f, "Leaves succeeded: {}", self.leaves_succeeded)?;
        writeln!(f, "Leaves failed:    {}", self.leaves_failed)?;
        writeln!(f, "Docs written:     {}", self.docs_written)?;
        Ok(())
    }
}
