//! Composition of the individual validators into one plan.
//!
//! Validators run in a fixed order (eager-load, fields, sort, filter,
//! pagination) and the first failure is the one reported.

use crate::contract::{MatchCase, PresenterContract};
use crate::eager_load::{self, EMBED_PARAM, EagerLoad, INCLUDE_PARAM};
use crate::error::Error;
use crate::fields::{self, FIELDS_PARAM};
use crate::filter::{self, Predicate};
use crate::limits::QueryLimits;
use crate::pagination::{PAGE_PARAM, PER_PARAM, PageRequest, PageWindow};
use crate::params::RawQueryParams;
use crate::sort::{self, DIR_PARAM, OrderKey, SORT_PARAM};

/// Validated instructions for one collection request.
///
/// Read-only once built; storage consumes it through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    selected_fields: Vec<String>,
    order: Option<OrderKey>,
    filters: Vec<Predicate>,
    page: PageRequest,
    relations: EagerLoad,
    match_case: MatchCase,
}

impl QueryPlan {
    /// Validate `params` against `contract`.
    ///
    /// # Errors
    ///
    /// The first validator error, in the order eager-load, fields, sort,
    /// filter, pagination.
    pub fn build(
        params: &RawQueryParams,
        contract: &PresenterContract,
        limits: &QueryLimits,
    ) -> Result<Self, Error> {
        let result = Self::build_inner(params, contract, limits);
        match &result {
            Ok(plan) => tracing::debug!(
                resource = contract.resource(),
                fields = plan.selected_fields.len(),
                filters = plan.filters.len(),
                page = plan.page.page,
                per = plan.page.per,
                "query plan built"
            ),
            Err(e) => tracing::debug!(
                resource = contract.resource(),
                error = %e,
                "query parameters rejected"
            ),
        }
        result
    }

    fn build_inner(
        params: &RawQueryParams,
        contract: &PresenterContract,
        limits: &QueryLimits,
    ) -> Result<Self, Error> {
        let relations = eager_load::resolve(
            params.get(EMBED_PARAM),
            params.get(INCLUDE_PARAM),
            contract,
        )?;
        let selected_fields = fields::select(params.get(FIELDS_PARAM), contract)?;
        let order = sort::sort(params.get(SORT_PARAM), params.get(DIR_PARAM), contract)?;
        let filters = filter::filter(params.predicates(), contract)?;
        let page = PageRequest::parse(params.get(PAGE_PARAM), params.get(PER_PARAM), limits)?;

        Ok(Self {
            selected_fields,
            order,
            filters,
            page,
            relations,
            match_case: contract.match_case(),
        })
    }

    #[must_use]
    pub fn selected_fields(&self) -> &[String] {
        &self.selected_fields
    }

    #[must_use]
    pub fn order(&self) -> Option<&OrderKey> {
        self.order.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    #[must_use]
    pub fn relations(&self) -> &EagerLoad {
        &self.relations
    }

    #[must_use]
    pub fn match_case(&self) -> MatchCase {
        self.match_case
    }

    /// Window over `total` filtered rows.
    #[must_use]
    pub fn window(&self, total: u64) -> PageWindow {
        PageWindow::new(self.page, total)
    }
}

/// Validated instructions for a single-record read: only relations and
/// fields apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPlan {
    selected_fields: Vec<String>,
    relations: EagerLoad,
}

impl MemberPlan {
    /// # Errors
    ///
    /// The first error from the eager-load resolver, then the field selector.
    pub fn build(params: &RawQueryParams, contract: &PresenterContract) -> Result<Self, Error> {
        let relations = eager_load::resolve(
            params.get(EMBED_PARAM),
            params.get(INCLUDE_PARAM),
            contract,
        )?;
        let selected_fields = fields::select(params.get(FIELDS_PARAM), contract)?;
        Ok(Self {
            selected_fields,
            relations,
        })
    }

    /// Plan rendering the contract's defaults with no relations.
    #[must_use]
    pub fn defaults(contract: &PresenterContract) -> Self {
        Self {
            selected_fields: contract.default_fields().to_vec(),
            relations: EagerLoad::default(),
        }
    }

    #[must_use]
    pub fn selected_fields(&self) -> &[String] {
        &self.selected_fields
    }

    #[must_use]
    pub fn relations(&self) -> &EagerLoad {
        &self.relations
    }
}
