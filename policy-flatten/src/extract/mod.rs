//! Level extractors.
//!
//! Every non-root table is produced by the same template, driven by a
//! [`LevelSpec`](levels::LevelSpec):
//!
//! 1. **Select** child element(s) of each parent scope by tag.
//! 2. **Project** the element (or a filtered subtree walk) into columns.
//! 3. **Bind** one FK per ancestor from the parent row.
//! 4. **Key** the element, salted with the parent's key.
//! 5. **Emit** one row per selected element.
//!
//! Promoted `Field` / `Field_id` pairs are plain projected columns; the level
//! only guarantees they exist in the schema. A level selected with
//! [`Selection::FirstOrScope`] emits a row even when the parent has no such
//! child, keyed on the parent as filtered by the projection.
//!
//! Each produced row keeps a borrow of its source element ([`Scoped`]) so the
//! next level can walk it without re-reading the table.

pub mod levels;
pub mod root;

use crate::core::{fk::bind_fks, ids::IdGenerator, project};
use crate::errors::{FlattenError, Result};
use crate::model::{element::Element, table::Row, table::Table};
use levels::{LevelSpec, Projection, Selection};
use tracing::debug;

/// A produced row together with the element it was extracted from.
#[derive(Debug, Clone)]
pub struct Scoped<'doc> {
    pub element: &'doc Element,
    pub row: Row,
}

/// Output of one extractor: the finished table plus the scopes children need.
#[derive(Debug)]
pub struct LevelOutput<'doc> {
    pub table: Table,
    pub scopes: Vec<Scoped<'doc>>,
}

/// Run the extraction template for `spec` over all `parents`.
pub fn extract_level<'doc>(
    spec: &LevelSpec,
    parents: &[Scoped<'doc>],
    ids: &mut IdGenerator,
) -> Result<LevelOutput<'doc>> {
    let level = spec.level;
    let table_name = level.table_name();
    let parent_fk = level
        .parent()
        .ok_or_else(|| FlattenError::KeyBinding {
            ancestor: "<parent>".to_string(),
            table: table_name.to_string(),
        })?
        .fk_column();
    let ancestors = level.ancestors();
    let pk_column = level.pk_column();

    let mut table = Table::new(table_name, spec.base_columns());
    let mut scopes = Vec::new();

    for parent in parents {
        let mut selected = select(spec.select, parent.element, level.tag());
        let fallback = selected.is_empty() && spec.select == Selection::FirstOrScope;
        if fallback {
            selected.push(parent.element);
        }

        for element in selected {
            let mut row = match spec.projection {
                Projection::Own => project::project(element),
                Projection::Subtree(filter) => project::project_subtree(element, filter),
                Projection::ParentSubtree(filter) => {
                    project::project_subtree(parent.element, filter)
                }
            };

            let fks = bind_fks(&ancestors, &parent.row, table_name)?;
            let salt = fks.get(&parent_fk).map(String::as_str).unwrap_or_default();
            let pk = if fallback {
                ids.generate(&project::filtered_subtree(element, spec.projection.filter()), salt)
            } else {
                ids.generate(element, salt)
            };

            row.extend(fks);
            row.insert(pk_column.clone(), pk);
            table.push(row.clone());
            scopes.push(Scoped { element, row });
        }
    }

    debug!(
        table = table_name,
        parents = parents.len(),
        rows = table.len(),
        "extracted level"
    );
    Ok(LevelOutput { table, scopes })
}

fn select<'doc>(selection: Selection, scope: &'doc Element, tag: &str) -> Vec<&'doc Element> {
    match selection {
        Selection::Each => scope.children.iter().filter(|c| c.tag == tag).collect(),
        Selection::First | Selection::FirstOrScope => scope.find(tag).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::generate_id;
    use crate::core::project::TagFilter;
    use crate::model::level::Level;

    fn producer_scope(producer: &Element) -> Scoped<'_> {
        let mut row = Row::new();
        row.insert("FK_PersAutoPolicyModRq".into(), "root-pk".into());
        row.insert("PK_PersAutoPolicyModRq_Producer".into(), "prod-pk".into());
        Scoped {
            element: producer,
            row,
        }
    }

    fn producer() -> Element {
        Element::new("Producer")
            .with_attr("id", "P1")
            .with_child(
                Element::new("ProducerInfo")
                    .with_attr("id", "PI1")
                    .with_child(Element::new("ContractNumber").with_attr("id", "c1").with_text("C-1"))
                    .with_child(Element::new("ProducerSubCode").with_text("S-1")),
            )
            .with_child(
                Element::new("ProducerInfo")
                    .with_attr("id", "PI2")
                    .with_child(Element::new("ContractNumber").with_text("C-2")),
            )
    }

    #[test]
    fn repeated_elements_explode_into_rows() {
        let p = producer();
        let parents = vec![producer_scope(&p)];
        let mut ids = IdGenerator::uncached();
        let out = extract_level(&levels::PRODUCER_INFO, &parents, &mut ids).unwrap();

        assert_eq!(out.table.len(), 2);
        assert_eq!(out.scopes.len(), 2);
        assert_eq!(out.table.column("ProducerInfo_id"), vec![Some("PI1"), Some("PI2")]);
        assert_eq!(out.table.column("ContractNumber"), vec![Some("C-1"), Some("C-2")]);
        assert_eq!(out.table.column("ContractNumber_id"), vec![Some("c1"), None]);
        assert_eq!(out.table.column("ProducerSubCode"), vec![Some("S-1"), None]);
        assert_eq!(
            out.table.column("FK_PersAutoPolicyModRq"),
            vec![Some("root-pk"), Some("root-pk")]
        );
        assert_eq!(
            out.table.column("PK_Producer_ProducerInfo")[0],
            Some(generate_id(&p.children[0], "prod-pk").as_str())
        );
    }

    #[test]
    fn first_selection_yields_zero_rows_when_absent() {
        let p = producer();
        let parents = vec![producer_scope(&p)];
        let mut ids = IdGenerator::uncached();
        let out = extract_level(&levels::ITEM_ID_INFO, &parents, &mut ids).unwrap();
        assert!(out.table.is_empty());
        assert_eq!(
            out.table.columns()[..3],
            [
                "FK_PersAutoPolicyModRq".to_string(),
                "FK_PersAutoPolicyModRq_Producer".to_string(),
                Level::ItemIdInfo.pk_column(),
            ]
        );
    }

    fn name_info_scope<'a>(name_info: &'a Element, pk: &str) -> Scoped<'a> {
        let mut row = Row::new();
        row.insert("FK_PersAutoPolicyModRq".into(), "root-pk".into());
        row.insert("FK_PersAutoPolicyModRq_Producer".into(), "prod-pk".into());
        row.insert("FK_Producer_GeneralPartyInfo".into(), "gpi-pk".into());
        row.insert("PK_GeneralPartyInfo_NameInfo".into(), pk.into());
        Scoped {
            element: name_info,
            row,
        }
    }

    #[test]
    fn comml_name_row_exists_for_every_name_info() {
        let with_name = Element::new("NameInfo").with_attr("id", "N1").with_child(
            Element::new("CommlName")
                .with_attr("id", "C1")
                .with_child(Element::new("CommercialName").with_text("ACME")),
        );
        let tax_only = Element::new("NameInfo").with_attr("id", "N2").with_child(
            Element::new("TaxIdentity")
                .with_attr("id", "T2")
                .with_child(Element::new("TaxId").with_text("99")),
        );
        let parents = vec![
            name_info_scope(&with_name, "n1-pk"),
            name_info_scope(&tax_only, "n2-pk"),
        ];
        let mut ids = IdGenerator::uncached();
        let out = extract_level(&levels::COMML_NAME, &parents, &mut ids).unwrap();

        assert_eq!(out.table.len(), 2);
        assert_eq!(out.table.column("CommlName_id"), vec![Some("C1"), None]);
        assert_eq!(out.table.column("CommercialName"), vec![Some("ACME"), None]);
        assert!(out.table.column("TaxId").iter().all(Option::is_none));
        assert_eq!(
            out.table.column("FK_GeneralPartyInfo_NameInfo"),
            vec![Some("n1-pk"), Some("n2-pk")]
        );

        let keys = out.table.column(&Level::CommlName.pk_column());
        assert_eq!(keys[0], Some(generate_id(&with_name.children[0], "n1-pk").as_str()));
        let filtered = project::filtered_subtree(
            &tax_only,
            TagFilter::Exclude(levels::COMML_NAME_EXCLUDED),
        );
        assert_eq!(keys[1], Some(generate_id(&filtered, "n2-pk").as_str()));
        assert_ne!(keys[1], Some(generate_id(&tax_only, "n2-pk").as_str()));
    }

    #[test]
    fn tax_identity_stays_optional() {
        let name_only = Element::new("NameInfo")
            .with_attr("id", "N1")
            .with_child(Element::new("CommlName").with_attr("id", "C1"));
        let parents = vec![name_info_scope(&name_only, "n1-pk")];
        let mut ids = IdGenerator::uncached();
        let out = extract_level(&levels::TAX_IDENTITY, &parents, &mut ids).unwrap();
        assert!(out.table.is_empty());
    }

    #[test]
    fn repeated_promoted_field_keeps_last_value_and_id() {
        let p = Element::new("Producer").with_child(
            Element::new("ProducerInfo")
                .with_attr("id", "PI1")
                .with_child(Element::new("ContractNumber").with_attr("id", "c1").with_text("C-1"))
                .with_child(Element::new("ContractNumber").with_attr("id", "c2").with_text("C-2")),
        );
        let parents = vec![producer_scope(&p)];
        let mut ids = IdGenerator::uncached();
        let out = extract_level(&levels::PRODUCER_INFO, &parents, &mut ids).unwrap();

        assert_eq!(out.table.column("ContractNumber"), vec![Some("C-2")]);
        assert_eq!(out.table.column("ContractNumber_id"), vec![Some("c2")]);
        assert_eq!(out.table.column("ProducerSubCode"), vec![None]);
        assert!(out.table.columns().iter().any(|c| c == "ProducerSubCode_id"));
    }

    #[test]
    fn unbound_parent_row_is_an_error() {
        let p = producer();
        let parents = vec![Scoped {
            element: &p,
            row: Row::new(),
        }];
        let mut ids = IdGenerator::uncached();
        let err = extract_level(&levels::PRODUCER_INFO, &parents, &mut ids).unwrap_err();
        assert!(matches!(err, FlattenError::KeyBinding { .. }));
    }
}
