//! The module registry.
//!
//! Built once as a static array. Its order is the order modules run in, and
//! it is indexed by [`ModuleId`] discriminant.

use std::collections::BTreeSet;

use crate::data::record::FieldType::{Float, Int, Text};
use crate::data::tokenize::HeaderLayout;
use crate::query::options::Ordering;
use crate::query::transform::Transform;

use super::charts;
use super::descriptor::{ModuleDescriptor, ModuleId, TableSpec};

/// Number of `Kmer Content` records kept for charting.
pub const KMER_TOP_K: usize = 6;

const fn artifacts_only(
    id: ModuleId,
    name: &'static str,
    flag: &'static str,
    alias: &'static str,
) -> ModuleDescriptor {
    ModuleDescriptor {
        id,
        name,
        flag,
        alias,
        help: name,
        required: true,
        selectable: true,
        display_stats: false,
        artifacts: true,
        table: None,
    }
}

const fn tabular(
    id: ModuleId,
    name: &'static str,
    flag: &'static str,
    alias: &'static str,
    table: TableSpec,
) -> ModuleDescriptor {
    ModuleDescriptor {
        table: Some(table),
        ..artifacts_only(id, name, flag, alias)
    }
}

/// All modules, in run order.
pub static REGISTRY: [ModuleDescriptor; 12] = [
    ModuleDescriptor {
        id: ModuleId::BasicStatistics,
        name: "Basic Statistics",
        flag: "basic-stats",
        alias: "m1",
        help: "Basic Statistics",
        required: true,
        selectable: false,
        display_stats: true,
        artifacts: false,
        table: None,
    },
    tabular(
        ModuleId::PerBaseSeqQuality,
        "Per base sequence quality",
        "per-base-seq-qlty",
        "m2",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Float, Float, Float, Float, Float, Float],
            transforms: &[Transform::IndexBy("Base")],
            chart: charts::per_base_quality,
        },
    ),
    tabular(
        ModuleId::PerTileSeqQuality,
        "Per tile sequence quality",
        "per-tile-seq-qlty",
        "m3",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Int, Float],
            transforms: &[Transform::Pivot {
                rows: Ordering::by("Tile").descending(),
                columns: "Base",
                values: "Mean",
            }],
            chart: charts::per_tile_quality,
        },
    ),
    tabular(
        ModuleId::PerSeqQualityScores,
        "Per sequence quality scores",
        "per-seq-qlty-scores",
        "m4",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Float],
            transforms: &[Transform::IndexBy("Quality")],
            chart: charts::per_sequence_quality,
        },
    ),
    tabular(
        ModuleId::PerBaseSeqContent,
        "Per base sequence content",
        "per-base-seq-content",
        "m5",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Float, Float, Float, Float],
            transforms: &[Transform::IndexBy("Base")],
            chart: charts::per_base_content,
        },
    ),
    tabular(
        ModuleId::PerSeqGcContent,
        "Per sequence GC content",
        "per-sequence-gc-content",
        "m6",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Float, Float],
            transforms: &[Transform::IndexBy("GC Content")],
            chart: charts::gc_content,
        },
    ),
    tabular(
        ModuleId::PerBaseNContent,
        "Per base N content",
        "per-base-n-content",
        "m7",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Float],
            transforms: &[Transform::IndexBy("Base")],
            chart: charts::n_content,
        },
    ),
    tabular(
        ModuleId::SeqLengthDistribution,
        "Sequence Length Distribution",
        "seq-len-dist",
        "m8",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Text, Float],
            transforms: &[Transform::IndexBy("Length")],
            chart: charts::length_distribution,
        },
    ),
    tabular(
        ModuleId::SeqDuplicationLevels,
        "Sequence Duplication Levels",
        "seq-dup-levels",
        "m9",
        TableSpec {
            layout: HeaderLayout::with_summary(1),
            fields: &[Text, Float, Float],
            transforms: &[Transform::IndexBy("Duplication Level")],
            chart: charts::duplication_levels,
        },
    ),
    artifacts_only(
        ModuleId::OverrepresentedSeqs,
        "Overrepresented sequences",
        "overrep-seq",
        "m10",
    ),
    tabular(
        ModuleId::AdapterContent,
        "Adapter Content",
        "adapter-content",
        "m11",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Int, Float, Float, Float, Float],
            transforms: &[Transform::IndexBy("Position")],
            chart: charts::adapter_content,
        },
    ),
    tabular(
        ModuleId::KmerContent,
        "Kmer Content",
        "kmer-content",
        "m12",
        TableSpec {
            layout: HeaderLayout::STANDARD,
            fields: &[Text, Int, Float, Float, Int],
            transforms: &[
                Transform::IndexBy("Max Obs/Exp Position"),
                Transform::TopK {
                    by: "Count",
                    k: KMER_TOP_K,
                },
            ],
            chart: charts::kmer_content,
        },
    ),
];

/// Descriptor for `id`.
pub fn descriptor(id: ModuleId) -> &'static ModuleDescriptor {
    &REGISTRY[id as usize]
}

/// Modules that always run, in registry order.
pub fn fixed_modules() -> impl Iterator<Item = &'static ModuleDescriptor> {
    REGISTRY.iter().filter(|d| !d.selectable)
}

/// Modules a caller may switch on, in registry order.
pub fn selectable_modules() -> impl Iterator<Item = &'static ModuleDescriptor> {
    REGISTRY.iter().filter(|d| d.selectable)
}

/// Which selectable modules a run activates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every selectable module
    All,
    /// Only the listed modules
    Only(BTreeSet<ModuleId>),
    /// No selectable modules
    #[default]
    None,
}

impl Selection {
    /// Select only the given modules.
    pub fn only(ids: impl IntoIterator<Item = ModuleId>) -> Self {
        Selection::Only(ids.into_iter().collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether the activation flag for `id` is set.
    pub fn is_active(&self, id: ModuleId) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(ids) => ids.contains(&id),
            Selection::None => false,
        }
    }

    /// Active selectable modules, in registry order.
    pub fn modules(&self) -> Vec<&'static ModuleDescriptor> {
        selectable_modules().filter(|d| self.is_active(d.id)).collect()
    }
}
