//! Query plan → `sea_orm` compiler.
//!
//! Validation already happened in `shelf_query`; this module only maps
//! validated predicates onto columns. Values are always bound parameters.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
    sea_query::{Expr, Func, LikeExpr, Order, SimpleExpr},
};
use shelf_query::{FilterOp, FilterValue, MatchCase, Page, Predicate, QueryPlan, SortDir};

use crate::error::StorageError;
use crate::kind::FieldKind;

#[derive(Clone)]
pub struct Column<E: EntityTrait> {
    pub col: E::Column,
    pub kind: FieldKind,
}

/// API field name → entity column, plus the primary key used as tiebreaker.
#[derive(Clone)]
#[must_use]
pub struct ColumnMap<E: EntityTrait> {
    map: HashMap<String, Column<E>>,
    primary: String,
}

impl<E: EntityTrait> ColumnMap<E> {
    /// Start a map whose primary key is `name`.
    pub fn new(name: impl Into<String>, col: E::Column, kind: FieldKind) -> Self {
        let name = name.into();
        let mut map = HashMap::new();
        map.insert(name.clone(), Column { col, kind });
        Self { map, primary: name }
    }

    pub fn insert(mut self, api_name: impl Into<String>, col: E::Column, kind: FieldKind) -> Self {
        self.map.insert(api_name.into(), Column { col, kind });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column<E>> {
        self.map.get(name)
    }

    #[must_use]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    fn resolve(&self, name: &str) -> Result<&Column<E>, StorageError> {
        self.get(name)
            .ok_or_else(|| StorageError::UnmappedField(name.to_owned()))
    }
}

/* ---------- LIKE helpers ---------- */

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn like_pattern(op: FilterOp, raw: &str) -> String {
    match op {
        FilterOp::Start => format!("{}%", like_escape(raw)),
        FilterOp::End => format!("%{}", like_escape(raw)),
        _ => format!("%{}%", like_escape(raw)),
    }
}

fn like_expr<C>(col: C, case: MatchCase, pattern: String, negate: bool) -> SimpleExpr
where
    C: ColumnTrait,
{
    let (target, pattern) = match case {
        MatchCase::Insensitive => (
            Expr::expr(Func::lower(Expr::col(col))),
            pattern.to_lowercase(),
        ),
        MatchCase::Sensitive => (Expr::col(col), pattern),
    };
    let like = LikeExpr::new(pattern).escape('\\');
    if negate {
        target.not_like(like)
    } else {
        target.like(like)
    }
}

fn present_expr<C>(col: C, kind: FieldKind, present: bool) -> SimpleExpr
where
    C: ColumnTrait,
{
    match (kind, present) {
        (FieldKind::String, true) => Expr::col(col).is_not_null().and(Expr::col(col).ne("")),
        (FieldKind::String, false) => Expr::col(col).is_null().or(Expr::col(col).eq("")),
        (_, true) => Expr::col(col).is_not_null(),
        (_, false) => Expr::col(col).is_null(),
    }
}

/* ---------- Predicate -> Condition ---------- */

/// Convert one validated predicate into a condition on its column.
///
/// # Errors
///
/// `StorageError::Query` with `InvalidValue` when the value does not parse
/// as the column's type, or `InvalidOperator` for a pattern operator on a
/// non-text column. `StorageError::UnmappedField` if the field has no
/// column.
pub fn predicate_to_condition<E>(
    p: &Predicate,
    cmap: &ColumnMap<E>,
    case: MatchCase,
) -> Result<Condition, StorageError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let Column { col, kind } = *cmap.resolve(&p.field)?;
    let bind = |raw: &str| kind.coerce(raw).ok_or_else(|| p.invalid_value());

    if p.op.is_pattern() && kind != FieldKind::String {
        return Err(p.invalid_operator().into());
    }

    let expr = match (p.op, &p.value) {
        (FilterOp::Eq, FilterValue::Single(raw)) => Expr::col(col).eq(bind(raw.as_str())?),
        (FilterOp::NotEq, FilterValue::Single(raw)) => Expr::col(col).ne(bind(raw.as_str())?),
        (FilterOp::Gt, FilterValue::Single(raw)) => Expr::col(col).gt(bind(raw.as_str())?),
        (FilterOp::Gteq, FilterValue::Single(raw)) => Expr::col(col).gte(bind(raw.as_str())?),
        (FilterOp::Lt, FilterValue::Single(raw)) => Expr::col(col).lt(bind(raw.as_str())?),
        (FilterOp::Lteq, FilterValue::Single(raw)) => Expr::col(col).lte(bind(raw.as_str())?),
        (op @ (FilterOp::Cont | FilterOp::Start | FilterOp::End), FilterValue::Single(raw)) => {
            like_expr(col, case, like_pattern(op, raw), false)
        }
        (FilterOp::NotCont, FilterValue::Single(raw)) => {
            like_expr(col, case, like_pattern(FilterOp::NotCont, raw), true)
        }
        (FilterOp::In, FilterValue::List(items)) => {
            let vals = items
                .iter()
                .map(|raw| bind(raw.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            if vals.is_empty() {
                // IN () → always false
                Expr::val(1).eq(0)
            } else {
                Expr::col(col).is_in(vals)
            }
        }
        (FilterOp::NotIn, FilterValue::List(items)) => {
            let vals = items
                .iter()
                .map(|raw| bind(raw.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            if vals.is_empty() {
                return Ok(Condition::all());
            }
            Expr::col(col).is_not_in(vals)
        }
        (FilterOp::Null, FilterValue::Flag(true)) => Expr::col(col).is_null(),
        (FilterOp::Null, FilterValue::Flag(false)) => Expr::col(col).is_not_null(),
        (FilterOp::Present, FilterValue::Flag(present)) => present_expr(col, kind, *present),
        // operator/value shapes the validator never produces
        _ => return Err(p.invalid_value().into()),
    };
    Ok(Condition::all().add(expr))
}

fn to_order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

/* ---------- Select extension ---------- */

pub trait PlanSelectExt<E: EntityTrait>: Sized {
    /// AND all plan predicates into the `WHERE` clause.
    ///
    /// # Errors
    ///
    /// See [`predicate_to_condition`].
    fn apply_filters(self, plan: &QueryPlan, cmap: &ColumnMap<E>) -> Result<Self, StorageError>;

    /// Order by the requested key, then by primary key ascending unless the
    /// requested key already is the primary key. Without a requested key the
    /// primary key alone orders the rows.
    ///
    /// # Errors
    ///
    /// `StorageError::UnmappedField` if the sort field has no column.
    fn apply_order(self, plan: &QueryPlan, cmap: &ColumnMap<E>) -> Result<Self, StorageError>;
}

impl<E> PlanSelectExt<E> for Select<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    fn apply_filters(self, plan: &QueryPlan, cmap: &ColumnMap<E>) -> Result<Self, StorageError> {
        if plan.filters().is_empty() {
            return Ok(self);
        }
        let mut cond = Condition::all();
        for p in plan.filters() {
            cond = cond.add(predicate_to_condition(p, cmap, plan.match_case())?);
        }
        Ok(self.filter(cond))
    }

    fn apply_order(self, plan: &QueryPlan, cmap: &ColumnMap<E>) -> Result<Self, StorageError> {
        let mut s = self;
        if let Some(key) = plan.order() {
            let column = cmap.resolve(&key.field)?;
            s = s.order_by(column.col, to_order(key.dir));
            if key.field == cmap.primary() {
                return Ok(s);
            }
        }
        let pk = cmap.resolve(cmap.primary())?;
        Ok(s.order_by(pk.col, Order::Asc))
    }
}

/* ---------- pagination ---------- */

/// Filter, count, order and slice `select` according to `plan`.
///
/// The count is taken after filtering and before ordering/limits; the page
/// window is derived from it.
///
/// # Errors
///
/// `StorageError` from filter compilation or the database.
pub async fn paginate_plan<E, C>(
    select: Select<E>,
    conn: &C,
    plan: &QueryPlan,
    cmap: &ColumnMap<E>,
) -> Result<Page<E::Model>, StorageError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
    E::Model: Sync,
    C: ConnectionTrait + Send + Sync,
{
    let filtered = select.apply_filters(plan, cmap)?;
    let total = filtered.clone().count(conn).await?;
    let window = plan.window(total);
    tracing::debug!(
        total,
        offset = window.offset,
        limit = window.limit,
        "paginating query plan"
    );
    if window.is_empty() {
        return Ok(Page::new(Vec::new(), window));
    }
    let rows = filtered
        .apply_order(plan, cmap)?
        .offset(window.offset)
        .limit(window.limit)
        .all(conn)
        .await?;
    Ok(Page::new(rows, window))
}
