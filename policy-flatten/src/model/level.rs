//! The fixed table hierarchy of a `PersAutoPolicyModRq` message.
//!
//! Each [`Level`] is one output table. Key columns are named after
//! [`Level::key_name`] (`PK_<key>` / `FK_<key>`), output files after
//! [`Level::table_name`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    PersAutoPolicyModRq,
    Producer,
    ItemIdInfo,
    GeneralPartyInfo,
    NameInfo,
    CommlName,
    TaxIdentity,
    ProducerInfo,
}

impl Level {
    /// All levels in extraction order (every parent precedes its children).
    pub const ALL: [Level; 8] = [
        Level::PersAutoPolicyModRq,
        Level::Producer,
        Level::ItemIdInfo,
        Level::GeneralPartyInfo,
        Level::NameInfo,
        Level::CommlName,
        Level::TaxIdentity,
        Level::ProducerInfo,
    ];

    /// Source element tag for this level.
    pub fn tag(self) -> &'static str {
        match self {
            Level::PersAutoPolicyModRq => "PersAutoPolicyModRq",
            Level::Producer => "Producer",
            Level::ItemIdInfo => "ItemIdInfo",
            Level::GeneralPartyInfo => "GeneralPartyInfo",
            Level::NameInfo => "NameInfo",
            Level::CommlName => "CommlName",
            Level::TaxIdentity => "TaxIdentity",
            Level::ProducerInfo => "ProducerInfo",
        }
    }

    /// Name used inside `PK_`/`FK_` key columns.
    pub fn key_name(self) -> &'static str {
        match self {
            Level::PersAutoPolicyModRq => "PersAutoPolicyModRq",
            Level::Producer => "PersAutoPolicyModRq_Producer",
            Level::ItemIdInfo => "PersAutoPolicyModRq_Producer_ItemIdInfo",
            Level::GeneralPartyInfo => "Producer_GeneralPartyInfo",
            Level::NameInfo => "GeneralPartyInfo_NameInfo",
            Level::CommlName => "NameInfo_CommlName",
            Level::TaxIdentity => "NameInfo_TaxIdentity",
            Level::ProducerInfo => "Producer_ProducerInfo",
        }
    }

    /// Output table name (`TABLE_<path from root>`).
    pub fn table_name(self) -> &'static str {
        match self {
            Level::PersAutoPolicyModRq => "TABLE_PersAutoPolicyModRq",
            Level::Producer => "TABLE_PersAutoPolicyModRq_Producer",
            Level::ItemIdInfo => "TABLE_PersAutoPolicyModRq_Producer_ItemIdInfo",
            Level::GeneralPartyInfo => "TABLE_PersAutoPolicyModRq_Producer_GeneralPartyInfo",
            Level::NameInfo => "TABLE_PersAutoPolicyModRq_Producer_GeneralPartyInfo_NameInfo",
            Level::CommlName => {
                "TABLE_PersAutoPolicyModRq_Producer_GeneralPartyInfo_NameInfo_CommlName"
            }
            Level::TaxIdentity => {
                "TABLE_PersAutoPolicyModRq_Producer_GeneralPartyInfo_NameInfo_CommlName_TaxIdentity"
            }
            Level::ProducerInfo => "TABLE_PersAutoPolicyModRq_Producer_ProducerInfo",
        }
    }

    /// Parent level; `None` for the root message.
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::PersAutoPolicyModRq => None,
            Level::Producer => Some(Level::PersAutoPolicyModRq),
            Level::ItemIdInfo | Level::GeneralPartyInfo | Level::ProducerInfo => {
                Some(Level::Producer)
            }
            Level::NameInfo => Some(Level::GeneralPartyInfo),
            Level::CommlName | Level::TaxIdentity => Some(Level::NameInfo),
        }
    }

    /// Ancestors from the nearest (parent) up to the root.
    pub fn ancestors(self) -> Vec<Level> {
        let mut out = Vec::new();
        let mut cur = self.parent();
        while let Some(level) = cur {
            out.push(level);
            cur = level.parent();
        }
        out
    }

    pub fn pk_column(self) -> String {
        format!("PK_{}", self.key_name())
    }

    pub fn fk_column(self) -> String {
        format!("FK_{}", self.key_name())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
