//! # Project Data Structures
//!
//! The `Project` struct is the root container for a detailed estimate.
//! Projects serialize to `.scp` (SiteCalc Project) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, name, estimator, timestamps)
//! ├── settings: GlobalSettings (rates, steel method, currency)
//! ├── members: Vec<Member> (project desk rows, in entry order)
//! └── elements: HashMap<Uuid, StructuralElement> (steel take-offs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sitecalc_core::estimate::Member;
//! use sitecalc_core::project::Project;
//!
//! let mut project = Project::new("G+1 Residence", "R. Kumar");
//! project.add_member(Member::sample_column());
//!
//! let totals = project.totals();
//! assert!(totals.grand_total > 0.0);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{ElementSteelResult, StructuralElement};
use crate::errors::{CalcError, CalcResult};
use crate::estimate::{
    estimate_member, project_totals_by, Member, MemberEstimate, ProjectTotals, RateConfig,
    SteelWeightMethod,
};

/// Current schema version for .scp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, name, estimator)
    pub meta: ProjectMetadata,

    /// Rates and estimation settings
    pub settings: GlobalSettings,

    /// Members in the order they were entered
    #[serde(default)]
    pub members: Vec<Member>,

    /// Steel take-off elements, keyed by UUID
    #[serde(default)]
    pub elements: HashMap<Uuid, StructuralElement>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sitecalc_core::project::Project;
    ///
    /// let project = Project::new("Warehouse", "A. Shah");
    /// assert_eq!(project.meta.name, "Warehouse");
    /// assert!(project.members.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, estimator: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                estimator: estimator.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            members: Vec::new(),
            elements: HashMap::new(),
        }
    }

    /// Append a member. Returns its id.
    pub fn add_member(&mut self, member: Member) -> Uuid {
        let id = member.id;
        self.members.push(member);
        self.touch();
        id
    }

    /// Append a blank "Member N" row. Returns its id.
    pub fn add_placeholder_member(&mut self) -> Uuid {
        let member = Member::placeholder(self.members.len() + 1);
        self.add_member(member)
    }

    /// Remove a member by id.
    ///
    /// Returns the removed member if it existed.
    pub fn remove_member(&mut self, id: &Uuid) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.id == id)?;
        let member = self.members.remove(index);
        self.touch();
        Some(member)
    }

    /// Get a member by id.
    pub fn get_member(&self, id: &Uuid) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Get a mutable reference to a member by id.
    ///
    /// Marks the project as modified when the member is found.
    pub fn get_member_mut(&mut self, id: &Uuid) -> Option<&mut Member> {
        let index = self.members.iter().position(|m| &m.id == id)?;
        self.meta.modified = Utc::now();
        self.members.get_mut(index)
    }

    /// Find a member by id, or by its position in the list (1-based) when
    /// the reference is a plain number.
    pub fn find_member(&self, reference: &str) -> CalcResult<&Member> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return self
                .get_member(&id)
                .ok_or_else(|| CalcError::not_found("member", reference));
        }
        reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.members.get(index))
            .ok_or_else(|| CalcError::not_found("member", reference))
    }

    /// Add a steel take-off element. Returns the UUID assigned to it.
    pub fn add_element(&mut self, element: StructuralElement) -> Uuid {
        let id = Uuid::new_v4();
        self.elements.insert(id, element);
        self.touch();
        id
    }

    /// Remove an element by UUID.
    pub fn remove_element(&mut self, id: &Uuid) -> Option<StructuralElement> {
        let element = self.elements.remove(id);
        if element.is_some() {
            self.touch();
        }
        element
    }

    /// Get an element by UUID.
    pub fn get_element(&self, id: &Uuid) -> Option<&StructuralElement> {
        self.elements.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Per-member previews at the project rates.
    pub fn member_estimates(&self) -> Vec<MemberEstimate> {
        self.members
            .iter()
            .map(|m| estimate_member(m, &self.settings.rates, self.settings.steel_method))
            .collect()
    }

    /// Project totals at the project rates and steel method.
    pub fn totals(&self) -> ProjectTotals {
        project_totals_by(&self.members, &self.settings.rates, self.settings.steel_method)
    }

    /// Take-offs for every element, sorted by label. Incomplete elements
    /// are listed with `None`.
    pub fn element_results(&self) -> Vec<(Uuid, &StructuralElement, Option<ElementSteelResult>)> {
        let mut rows: Vec<_> = self
            .elements
            .iter()
            .map(|(id, element)| (*id, element, element.steel_weight()))
            .collect();
        rows.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(&b.0)));
        rows
    }

    /// Check the project can be written to disk.
    pub fn validate_for_save(&self) -> CalcResult<()> {
        if self.meta.name.trim().is_empty() {
            return Err(CalcError::missing_field("name"));
        }
        Ok(())
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Project name
    pub name: String,

    /// Person preparing the estimate
    #[serde(default)]
    pub estimator: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Material and labor rates
    pub rates: RateConfig,

    /// Steel estimation method for member totals
    pub steel_method: SteelWeightMethod,

    /// Currency symbol used when printing costs
    pub currency_symbol: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            rates: RateConfig::default(),
            steel_method: SteelWeightMethod::default(),
            currency_symbol: "₹".to_string(),
        }
    }
}
