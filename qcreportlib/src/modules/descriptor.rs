//! Static module metadata.
//!
//! Every report module is described by one [`ModuleDescriptor`] value: its
//! display name, whether it must be present, which outputs it produces, and,
//! for tabular modules, a [`TableSpec`] holding its casting and shaping rule.
//! Adding a module means adding a descriptor, never a new type.

use std::fmt;

use serde::Serialize;

use crate::data::record::FieldType;
use crate::data::table::TableData;
use crate::data::tokenize::HeaderLayout;
use crate::output::chart::Chart;
use crate::query::transform::Transform;
use crate::source::Report;
use crate::Result;

/// Identifier for each known report module, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ModuleId {
    BasicStatistics,
    PerBaseSeqQuality,
    PerTileSeqQuality,
    PerSeqQualityScores,
    PerBaseSeqContent,
    PerSeqGcContent,
    PerBaseNContent,
    SeqLengthDistribution,
    SeqDuplicationLevels,
    OverrepresentedSeqs,
    AdapterContent,
    KmerContent,
}

impl ModuleId {
    /// Static descriptor for this module.
    pub fn descriptor(self) -> &'static ModuleDescriptor {
        super::registry::descriptor(self)
    }

    /// Display name, as it appears after the `>>` marker.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds a chart from a shaped table. The report is available for
/// metadata outside the section (e.g. quality encoding).
pub type ChartBuilder = fn(&TableData, &Report) -> Result<Chart>;

/// Casting and shaping rule for a tabular module.
#[derive(Clone, Copy)]
pub struct TableSpec {
    /// Where the column header sits
    pub layout: HeaderLayout,
    /// Per-field casts, in column order
    pub fields: &'static [FieldType],
    /// Post-casting transforms, applied in order
    pub transforms: &'static [Transform],
    /// Chart produced from the shaped table
    pub chart: ChartBuilder,
}

impl fmt::Debug for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSpec")
            .field("layout", &self.layout)
            .field("fields", &self.fields)
            .field("transforms", &self.transforms)
            .finish_non_exhaustive()
    }
}

/// Everything the pipeline needs to know about one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    /// Section name after the `>>` marker
    pub name: &'static str,
    /// Long command-line flag that selects the module
    pub flag: &'static str,
    /// Short alias for the flag (`m2`, `m3`, ...)
    pub alias: &'static str,
    /// One-line help text
    pub help: &'static str,
    /// Missing section is fatal when set; otherwise the module is skipped
    pub required: bool,
    /// Can be switched on or off by the caller; unselectable modules always run
    pub selectable: bool,
    /// Print the raw section instead of writing artifacts
    pub display_stats: bool,
    /// Write the module directory, report and classification files
    pub artifacts: bool,
    /// Typed table and chart rule, for tabular modules
    pub table: Option<TableSpec>,
}

impl ModuleDescriptor {
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }
}
