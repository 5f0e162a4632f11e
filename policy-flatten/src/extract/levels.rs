//! Declarative description of every non-root table.

use crate::core::project::TagFilter;
use crate::model::level::Level;

/// How child elements are picked from a parent scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every matching child; one row each.
    Each,
    /// First matching child only; absent means no row for that parent.
    First,
    /// First matching child; absent still yields one row for that parent,
    /// keyed on the parent scope as seen through the level's projection.
    FirstOrScope,
}

/// What gets projected into a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The selected element's own attributes and text.
    Own,
    /// Merged walk over the selected element's subtree.
    Subtree(TagFilter),
    /// Merged walk over the parent scope's subtree.
    ParentSubtree(TagFilter),
}

impl Projection {
    /// Tag filter applied by the walk; [`Projection::Own`] keeps everything.
    pub fn filter(self) -> TagFilter {
        match self {
            Projection::Own => TagFilter::All,
            Projection::Subtree(f) | Projection::ParentSubtree(f) => f,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    pub level: Level,
    pub select: Selection,
    pub projection: Projection,
    /// Scalar fields exposed as `Field` / `Field_id` columns. Values come
    /// from the projection walk; the columns exist even when null.
    pub promote: &'static [&'static str],
}

impl LevelSpec {
    /// Columns every row of this table exposes, even when null:
    /// FKs root-first, PK, promoted pairs, then the element's own `id`.
    pub fn base_columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = self
            .level
            .ancestors()
            .iter()
            .rev()
            .map(|a| a.fk_column())
            .collect();
        cols.push(self.level.pk_column());
        for field in self.promote {
            cols.push(field.to_string());
            cols.push(format!("{field}_id"));
        }
        cols.push(format!("{}_id", self.level.tag()));
        cols
    }
}

/// Tags left out of the CommlName walk over its NameInfo.
pub const COMML_NAME_EXCLUDED: &[&str] = &["NameInfo", "TaxIdentity", "TaxIdTypeCd", "TaxId"];

/// The only tags kept in the TaxIdentity walk over its NameInfo.
pub const TAX_IDENTITY_INCLUDED: &[&str] = &["TaxIdentity", "TaxIdTypeCd", "TaxId"];

pub const PRODUCER: LevelSpec = LevelSpec {
    level: Level::Producer,
    select: Selection::Each,
    projection: Projection::Own,
    promote: &[],
};

pub const ITEM_ID_INFO: LevelSpec = LevelSpec {
    level: Level::ItemIdInfo,
    select: Selection::First,
    projection: Projection::Subtree(TagFilter::All),
    promote: &["AgencyId", "InsurerId"],
};

pub const GENERAL_PARTY_INFO: LevelSpec = LevelSpec {
    level: Level::GeneralPartyInfo,
    select: Selection::Each,
    projection: Projection::Own,
    promote: &[],
};

pub const NAME_INFO: LevelSpec = LevelSpec {
    level: Level::NameInfo,
    select: Selection::Each,
    projection: Projection::Own,
    promote: &[],
};

pub const COMML_NAME: LevelSpec = LevelSpec {
    level: Level::CommlName,
    select: Selection::FirstOrScope,
    projection: Projection::ParentSubtree(TagFilter::Exclude(COMML_NAME_EXCLUDED)),
    promote: &["CommercialName"],
};

pub const TAX_IDENTITY: LevelSpec = LevelSpec {
    level: Level::TaxIdentity,
    select: Selection::First,
    projection: Projection::ParentSubtree(TagFilter::Include(TAX_IDENTITY_INCLUDED)),
    promote: &["TaxIdTypeCd", "TaxId"],
};

pub const PRODUCER_INFO: LevelSpec = LevelSpec {
    level: Level::ProducerInfo,
    select: Selection::Each,
    projection: Projection::Subtree(TagFilter::All),
    promote: &["ContractNumber", "ProducerSubCode"],
};

/// Spec for a level; `None` for the root message, which has its own extractor.
pub fn spec_for(level: Level) -> Option<LevelSpec> {
    match level {
        Level::PersAutoPolicyModRq => None,
        Level::Producer => Some(PRODUCER),
        Level::ItemIdInfo => Some(ITEM_ID_INFO),
        Level::GeneralPartyInfo => Some(GENERAL_PARTY_INFO),
        Level::NameInfo => Some(NAME_INFO),
        Level::CommlName => Some(COMML_NAME),
        Level::TaxIdentity => Some(TAX_IDENTITY),
        Level::ProducerInfo => Some(PRODUCER_INFO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_non_root_level_has_a_spec() {
        for level in Level::ALL {
            let spec = spec_for(level);
            assert_eq!(spec.is_none(), level == Level::PersAutoPolicyModRq);
            if let Some(spec) = spec {
                assert_eq!(spec.level, level);
            }
        }
    }

    #[test]
    fn tax_identity_base_columns() {
        assert_eq!(
            TAX_IDENTITY.base_columns(),
            [
                "FK_PersAutoPolicyModRq",
                "FK_PersAutoPolicyModRq_Producer",
                "FK_Producer_GeneralPartyInfo",
                "FK_GeneralPartyInfo_NameInfo",
                "PK_NameInfo_TaxIdentity",
                "TaxIdTypeCd",
                "TaxIdTypeCd_id",
                "TaxId",
                "TaxId_id",
                "TaxIdentity_id",
            ]
        );
    }
}
