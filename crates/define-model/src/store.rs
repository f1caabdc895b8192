//! Cross-reference store shared by all entity builders.
//!
//! One generation run owns a single [`DefineStore`]. Builders append entities
//! as their input section is processed; assembly then reads the populated
//! collections back in append order. Append order is significant — it
//! determines output element order, which matters for schema validity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::elements::{
    AnnotatedCrf, CodeList, CommentDef, DefineDocument, ItemDef, ItemGroupDef, Leaf,
    MetaDataVersion, MethodDef, RangeCheck, Standard, Study, ValueListDef, WhereClauseDef,
};
use crate::error::{ModelError, Result};

/// The closed set of entity families held by the store, in the
/// MetaDataVersion child order mandated by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    ValueListDef,
    WhereClauseDef,
    ItemGroupDef,
    ItemDef,
    CodeList,
    MethodDef,
    CommentDef,
    Leaf,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::ValueListDef,
        Family::WhereClauseDef,
        Family::ItemGroupDef,
        Family::ItemDef,
        Family::CodeList,
        Family::MethodDef,
        Family::CommentDef,
        Family::Leaf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Family::ValueListDef => "ValueListDef",
            Family::WhereClauseDef => "WhereClauseDef",
            Family::ItemGroupDef => "ItemGroupDef",
            Family::ItemDef => "ItemDef",
            Family::CodeList => "CodeList",
            Family::MethodDef => "MethodDef",
            Family::CommentDef => "CommentDef",
            Family::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flattened range-check held in the condition stash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashedRangeCheck {
    pub soft_hard: String,
    pub item_oid: String,
    pub comparator: String,
    pub check_values: Vec<String>,
}

/// A flattened condition awaiting resolution by WhereClause construction.
///
/// Conditions are transient intermediate data: they never appear in the
/// output tree themselves. The serde shape doubles as the persisted stash
/// format for the two-pass deployment, so field names are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashedCondition {
    pub oid: String,
    pub range_checks: Vec<StashedRangeCheck>,
}

impl StashedRangeCheck {
    pub fn to_range_check(&self) -> RangeCheck {
        RangeCheck {
            soft_hard: self.soft_hard.clone(),
            item_oid: self.item_oid.clone(),
            comparator: self.comparator.clone(),
            check_values: self.check_values.clone(),
        }
    }
}

/// Append-only collections of built entities, keyed by family, plus the
/// private condition stash.
///
/// OID collisions follow a single policy for every family:
/// first-definition-wins. A duplicate append is rejected and reported to the
/// caller through the `bool` return so the builder can log it.
#[derive(Debug, Default)]
pub struct DefineStore {
    study: Option<Study>,
    metadata_version: Option<MetaDataVersion>,
    standards: Vec<Standard>,
    annotated_crfs: Vec<AnnotatedCrf>,
    value_lists: Vec<ValueListDef>,
    where_clauses: Vec<WhereClauseDef>,
    item_groups: Vec<ItemGroupDef>,
    item_defs: Vec<ItemDef>,
    code_lists: Vec<CodeList>,
    methods: Vec<MethodDef>,
    comments: Vec<CommentDef>,
    leaves: Vec<Leaf>,
    conditions: Vec<StashedCondition>,
}

impl DefineStore {
    /// Create a store with every family initialized empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_study(&mut self, study: Study) {
        self.study = Some(study);
    }

    pub fn set_metadata_version(&mut self, mdv: MetaDataVersion) {
        self.metadata_version = Some(mdv);
    }

    pub fn study(&self) -> Option<&Study> {
        self.study.as_ref()
    }

    pub fn push_standard(&mut self, standard: Standard) -> bool {
        if self.standards.iter().any(|s| s.oid == standard.oid) {
            return false;
        }
        self.standards.push(standard);
        true
    }

    /// AnnotatedCRF wrappers carry no OID of their own; appends are
    /// unconditional.
    pub fn push_annotated_crf(&mut self, acrf: AnnotatedCrf) {
        self.annotated_crfs.push(acrf);
    }

    pub fn push_value_list(&mut self, vld: ValueListDef) -> bool {
        if self.value_lists.iter().any(|v| v.oid == vld.oid) {
            return false;
        }
        self.value_lists.push(vld);
        true
    }

    pub fn push_where_clause(&mut self, wc: WhereClauseDef) -> bool {
        if self.where_clauses.iter().any(|w| w.oid == wc.oid) {
            return false;
        }
        self.where_clauses.push(wc);
        true
    }

    pub fn push_item_group(&mut self, ig: ItemGroupDef) -> bool {
        if self.item_groups.iter().any(|g| g.oid == ig.oid) {
            return false;
        }
        self.item_groups.push(ig);
        true
    }

    pub fn push_item_def(&mut self, item: ItemDef) -> bool {
        if self.item_defs.iter().any(|i| i.oid == item.oid) {
            return false;
        }
        self.item_defs.push(item);
        true
    }

    pub fn push_code_list(&mut self, cl: CodeList) -> bool {
        if self.code_lists.iter().any(|c| c.oid == cl.oid) {
            return false;
        }
        self.code_lists.push(cl);
        true
    }

    pub fn push_method(&mut self, method: MethodDef) -> bool {
        if self.methods.iter().any(|m| m.oid == method.oid) {
            return false;
        }
        self.methods.push(method);
        true
    }

    pub fn push_comment(&mut self, comment: CommentDef) -> bool {
        if self.comments.iter().any(|c| c.oid == comment.oid) {
            return false;
        }
        self.comments.push(comment);
        true
    }

    pub fn push_leaf(&mut self, leaf: Leaf) -> bool {
        if self.leaves.iter().any(|l| l.id == leaf.id) {
            return false;
        }
        self.leaves.push(leaf);
        true
    }

    /// Look up a dataset for ItemRef attachment. A miss is a data error that
    /// must abort generation, so this returns an explicit not-found error
    /// naming the OID rather than a default.
    pub fn item_group_mut(&mut self, oid: &str) -> Result<&mut ItemGroupDef> {
        self.item_groups
            .iter_mut()
            .find(|g| g.oid == oid)
            .ok_or_else(|| ModelError::UnresolvedReference {
                family: Family::ItemGroupDef.as_str(),
                oid: oid.to_string(),
            })
    }

    pub fn find_item_def(&self, oid: &str) -> Option<&ItemDef> {
        self.item_defs.iter().find(|i| i.oid == oid)
    }

    pub fn find_where_clause(&self, oid: &str) -> Option<&WhereClauseDef> {
        self.where_clauses.iter().find(|w| w.oid == oid)
    }

    pub fn find_code_list(&self, oid: &str) -> Option<&CodeList> {
        self.code_lists.iter().find(|c| c.oid == oid)
    }

    pub fn item_groups(&self) -> &[ItemGroupDef] {
        &self.item_groups
    }

    pub fn item_defs(&self) -> &[ItemDef] {
        &self.item_defs
    }

    pub fn code_lists(&self) -> &[CodeList] {
        &self.code_lists
    }

    pub fn where_clauses(&self) -> &[WhereClauseDef] {
        &self.where_clauses
    }

    pub fn value_lists(&self) -> &[ValueListDef] {
        &self.value_lists
    }

    pub fn standards(&self) -> &[Standard] {
        &self.standards
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    pub fn comments(&self) -> &[CommentDef] {
        &self.comments
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn annotated_crfs(&self) -> &[AnnotatedCrf] {
        &self.annotated_crfs
    }

    /// Add a flattened condition to the private stash.
    pub fn stash_condition(&mut self, condition: StashedCondition) -> bool {
        if self.conditions.iter().any(|c| c.oid == condition.oid) {
            return false;
        }
        self.conditions.push(condition);
        true
    }

    pub fn stashed_condition(&self, oid: &str) -> Option<&StashedCondition> {
        self.conditions.iter().find(|c| c.oid == oid)
    }

    pub fn stashed_conditions(&self) -> &[StashedCondition] {
        &self.conditions
    }

    /// Consume the store and thread the populated collections into the final
    /// document in the fixed family order of [`Family::ALL`]. The store is
    /// read-only from this point on; conditions are intentionally left
    /// behind — they are not part of the output tree.
    pub fn into_document(self) -> Result<DefineDocument> {
        let study = self.study.ok_or(ModelError::MissingSingleton { name: "Study" })?;
        let metadata_version = self
            .metadata_version
            .ok_or(ModelError::MissingSingleton {
                name: "MetaDataVersion",
            })?;
        Ok(DefineDocument {
            study,
            metadata_version,
            standards: self.standards,
            annotated_crfs: self.annotated_crfs,
            value_lists: self.value_lists,
            where_clauses: self.where_clauses,
            item_groups: self.item_groups,
            item_defs: self.item_defs,
            code_lists: self.code_lists,
            methods: self.methods,
            comments: self.comments,
            leaves: self.leaves,
        })
    }
}
