use std::fmt;

/// The two lookup categories in PubChem, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Compound,
    Substance,
}

impl EntityKind {
    /// Path segment used by the PUG REST API.
    pub fn as_path(&self) -> &'static str {
        match self {
            EntityKind::Compound => "compound",
            EntityKind::Substance => "substance",
        }
    }

    /// Kind to query next when this one reports "not found".
    pub fn fallback(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Compound => Some(EntityKind::Substance),
            EntityKind::Substance => None,
        }
    }

    /// Status recorded when a lookup of this kind succeeds.
    pub fn found_status(&self) -> LookupStatus {
        match self {
            EntityKind::Compound => LookupStatus::CompoundFound,
            EntityKind::Substance => LookupStatus::SubstanceFound,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Outcome category of a lookup.
///
/// The labels returned by [`LookupStatus::label`] are what the report's
/// Status column holds; they are kept stable for existing spreadsheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupStatus {
    CompoundFound,
    SubstanceFound,
    NotFound,
}

impl LookupStatus {
    pub const ALL: [LookupStatus; 3] = [
        LookupStatus::CompoundFound,
        LookupStatus::SubstanceFound,
        LookupStatus::NotFound,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LookupStatus::CompoundFound => "compound found",
            LookupStatus::SubstanceFound => "substance",
            LookupStatus::NotFound => "not found",
        }
    }

    /// Parse a Status cell. Returns `None` for anything that is not one of
    /// the three exact labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of resolving one compound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// PubChem CID (or SID for substances)
    pub identifier: Option<u64>,
    /// Canonical SMILES, treated as an opaque string
    pub structure: Option<String>,
    pub status: LookupStatus,
}

impl LookupResult {
    pub fn found(kind: EntityKind, identifier: u64, structure: String) -> Self {
        Self {
            identifier: Some(identifier),
            structure: Some(structure),
            status: kind.found_status(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            identifier: None,
            structure: None,
            status: LookupStatus::NotFound,
        }
    }
}

/// Clickable link written into the Hyperlink column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    /// Visible cell text (the encoded name)
    pub label: String,
    /// Link target
    pub target: String,
}

/// One row of the report, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Name as read from the input; `None` for blank cells
    pub name: Option<String>,
    pub identifier: Option<u64>,
    pub structure: Option<String>,
    pub status: LookupStatus,
}

impl ReportRow {
    pub fn new(name: Option<String>, result: LookupResult) -> Self {
        Self {
            name,
            identifier: result.identifier,
            structure: result.structure,
            status: result.status,
        }
    }
}

/// Aggregate counts written below the report table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub total: usize,
    pub compounds_found: usize,
    pub substances_found: usize,
    pub not_found: usize,
}

impl SummaryCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = LookupStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status);
        }
        counts
    }

    pub fn record(&mut self, status: LookupStatus) {
        self.total += 1;
        match status {
            LookupStatus::CompoundFound => self.compounds_found += 1,
            LookupStatus::SubstanceFound => self.substances_found += 1,
            LookupStatus::NotFound => self.not_found += 1,
        }
    }

    /// `(label, value)` pairs in the order they appear in the report.
    pub fn lines(&self) -> [(&'static str, usize); 4] {
        [
            ("Total number of compounds:", self.total),
            ("Total number of compounds found:", self.compounds_found),
            ("Total number of substances found:", self.substances_found),
            ("Total number of compounds not found:", self.not_found),
        ]
    }

    pub fn summary(&self) -> String {
        format!(
            "{} compound{}: {} found, {} substance{}, {} not found",
            self.total,
            if self.total == 1 { "" } else { "s" },
            self.compounds_found,
            self.substances_found,
            if self.substances_found == 1 { "" } else { "s" },
            self.not_found,
        )
    }
}
