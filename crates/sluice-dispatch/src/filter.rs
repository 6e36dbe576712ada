//! The filter core: request parameters in, mutated backend out.
//!
//! A [`Filter`] is built for one request. It parses the raw parameters once,
//! then [`filter`](Filter::filter) walks them in request order and, for each
//! entry:
//!
//! 1. derives the operation name from the key (`where_2` → `where`);
//! 2. looks the name up in the [`Operations`] catalog;
//! 3. if an allow-list was configured, requires the operation to be on it,
//!    to have budget left, and its arguments to pass the declared rules;
//! 4. calls the operation and, on success, spends one unit of budget.
//!
//! Any entry failing a step is skipped and recorded in
//! [`report`](Filter::report); the pass carries on with the next entry.
//! Only backend failures abort it.
//!
//! With no allow-list every catalog operation may be called any number of
//! times. The first call to [`allow`](Filter::allow) switches the filter to
//! restricted mode.

use sluice_notation::{Arg, ParsedParameters, RawParameters};
use sluice_rules::{RuleSet, ValidationFailed};
use tracing::{debug, trace};

use crate::allow::{AllowList, Denied, OperationSpec};
use crate::backend::Backend;
use crate::error::{Error, Result, Stage};
use crate::operation::{operation_name, ArgumentError, Args, Operations};
use crate::page::Page;
use crate::report::{Outcome, SkipReason, Status};
use crate::settings::Settings;

/// Dispatches request parameters to operations against a backend.
///
/// # Example
///
/// ```rust,ignore
/// let ops = Operations::standard();
/// let raw = RawParameters::from_query("where=[age,>,30]&sort=[age,-1]&perPage=3");
///
/// let mut filter = Filter::new(table.query(), &ops, &raw)
///     .allow("where", where_rules(), Some(2))
///     .allow("sort", sort_rules(), None);
///
/// let page = filter.paginate()?;
/// ```
#[derive(Debug)]
pub struct Filter<'o, B> {
    backend: B,
    operations: &'o Operations<B>,
    params: ParsedParameters,
    settings: Settings,
    allowed: Option<AllowList>,
    report: Vec<Outcome>,
}

impl<'o, B: Backend> Filter<'o, B> {
    /// Creates a filter with default [`Settings`].
    pub fn new(backend: B, operations: &'o Operations<B>, raw: &RawParameters) -> Self {
        Self::with_settings(backend, operations, raw, Settings::default())
    }

    /// Creates a filter, parsing `raw` with the notation `settings` describe.
    pub fn with_settings(
        backend: B,
        operations: &'o Operations<B>,
        raw: &RawParameters,
        settings: Settings,
    ) -> Self {
        let params = settings.notation().parse_params(raw);
        Self::from_parsed(backend, operations, params, settings)
    }

    /// Creates a filter over parameters that were already parsed.
    ///
    /// Use this to plug in a different parser: anything that can produce
    /// a [`ParsedParameters`] works, including a hand-built one.
    pub fn from_parsed(
        backend: B,
        operations: &'o Operations<B>,
        params: ParsedParameters,
        settings: Settings,
    ) -> Self {
        Self {
            backend,
            operations,
            params,
            settings,
            allowed: None,
            report: Vec::new(),
        }
    }

    /// Declares an operation callable, with one rule set per argument.
    ///
    /// `max_calls` defaults to [`Settings::default_max_calls`]. Declaring
    /// the same name again replaces its rules and resets its budget.
    pub fn register_operation(
        &mut self,
        name: impl Into<String>,
        rules: Vec<RuleSet>,
        max_calls: Option<u32>,
    ) -> &mut Self {
        let max_calls = max_calls.unwrap_or(self.settings.default_max_calls);
        self.allowed
            .get_or_insert_with(AllowList::default)
            .allow(name.into(), rules, max_calls);
        self
    }

    /// Builder form of [`register_operation`](Self::register_operation).
    pub fn allow(
        mut self,
        name: impl Into<String>,
        rules: Vec<RuleSet>,
        max_calls: Option<u32>,
    ) -> Self {
        self.register_operation(name, rules, max_calls);
        self
    }

    /// Declares every operation in `specs`.
    pub fn allow_all<'s>(mut self, specs: impl IntoIterator<Item = &'s OperationSpec>) -> Self {
        for spec in specs {
            self.register_operation(spec.name.clone(), spec.rules.clone(), spec.max_calls);
        }
        self
    }

    /// Returns `true` once any operation has been declared.
    pub fn is_restricted(&self) -> bool {
        self.allowed.is_some()
    }

    /// Remaining budget for a declared operation.
    pub fn remaining_calls(&self, name: &str) -> Option<u32> {
        self.allowed.as_ref()?.remaining(name)
    }

    /// Applies every usable parameter to the backend, in request order.
    ///
    /// Budgets are spent in place and are not restored, so a second call
    /// only sees what the first left over. The report is rebuilt on every
    /// pass. The pagination parameters are never dispatched.
    pub fn filter(&mut self) -> Result<&mut B> {
        self.report.clear();

        for (key, parsed) in self.params.entries() {
            let name = operation_name(key);
            let args = match parsed {
                Ok(args) => args,
                Err(error) => {
                    let outcome = Outcome {
                        key: key.to_string(),
                        operation: name.to_string(),
                        status: Status::Skipped(SkipReason::Malformed(error.clone())),
                    };
                    record(&mut self.report, outcome);
                    continue;
                }
            };

            if key == self.settings.page_param || key == self.settings.per_page_param {
                continue;
            }

            let status = dispatch(
                &mut self.backend,
                self.operations,
                self.allowed.as_mut(),
                name,
                args,
            )
            .map_err(|source| Error::operation(name, key, source))?;

            let outcome = Outcome {
                key: key.to_string(),
                operation: name.to_string(),
                status,
            };
            if outcome.is_applied() {
                trace!(
                    key,
                    operation = name,
                    remaining = ?self.allowed.as_ref().and_then(|a| a.remaining(name)),
                    "applied operation"
                );
                self.report.push(outcome);
            } else {
                record(&mut self.report, outcome);
            }
        }

        Ok(&mut self.backend)
    }

    /// Filters, then fetches one page of rows with its metadata.
    ///
    /// Metadata is computed on one copy of the filtered backend and rows
    /// are fetched from another, so the count never sees the limit and
    /// the filtered backend itself stays unwindowed.
    pub fn paginate(&mut self) -> Result<Page<B::Row>> {
        self.filter()?;

        let page = self.current_page();
        let per_page = self.per_page();
        let offset = (page - 1).saturating_mul(per_page);

        debug!(page, per_page, "computing page metadata");
        let mut counted = self.backend.clone();
        let meta = counted
            .total_and_meta(per_page, page)
            .map_err(Error::backend(Stage::Meta))?;

        debug!(total = meta.total, offset, "fetching page");
        let mut windowed = self.backend.clone();
        windowed
            .apply_limit_offset(per_page, offset)
            .map_err(Error::backend(Stage::Window))?;
        let data = windowed
            .fetch_rows()
            .map_err(Error::backend(Stage::Fetch))?;

        Ok(Page::new(data, meta))
    }

    /// The resolved page number.
    pub fn current_page(&self) -> u64 {
        self.settings
            .page(self.params.first(&self.settings.page_param))
            .max(1)
    }

    /// The resolved page size.
    pub fn per_page(&self) -> u64 {
        self.settings
            .per_page(self.params.first(&self.settings.per_page_param))
    }

    /// One outcome per parameter of the last pass, in request order.
    ///
    /// Malformed entries are included. Well-formed pagination parameters
    /// are not, since they are never dispatched.
    pub fn report(&self) -> &[Outcome] {
        &self.report
    }

    /// The parsed request parameters.
    pub fn params(&self) -> &ParsedParameters {
        &self.params
    }

    /// The settings this filter was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The backend, with every operation applied so far.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to add fixed conditions.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the filter and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

fn dispatch<B>(
    backend: &mut B,
    operations: &Operations<B>,
    allowed: Option<&mut AllowList>,
    name: &str,
    args: &[Arg],
) -> anyhow::Result<Status> {
    let Some(operation) = operations.get(name) else {
        return Ok(Status::Skipped(SkipReason::UnknownOperation));
    };

    if let Some(list) = allowed.as_deref() {
        if let Err(denied) = list.admit(name, args) {
            return Ok(Status::Skipped(denied.into()));
        }
    }

    if args.len() != operation.arity() {
        return Ok(Status::Skipped(SkipReason::BadArguments(
            ArgumentError::Arity {
                expected: operation.arity(),
                actual: args.len(),
            },
        )));
    }

    if let Err(err) = operation.apply(backend, Args::new(args)) {
        let bad = argument_error(err)?;
        return Ok(Status::Skipped(SkipReason::BadArguments(bad)));
    }

    if let Some(list) = allowed {
        list.consume(name);
    }
    Ok(Status::Applied)
}

/// Separates unusable-argument errors from real failures.
fn argument_error(err: anyhow::Error) -> anyhow::Result<ArgumentError> {
    let err = match err.downcast::<ArgumentError>() {
        Ok(bad) => return Ok(bad),
        Err(err) => err,
    };
    err.downcast::<ValidationFailed>().map(ArgumentError::from)
}

fn record(report: &mut Vec<Outcome>, outcome: Outcome) {
    if let Some(reason) = outcome.skip_reason() {
        debug!(
            key = %outcome.key,
            operation = %outcome.operation,
            %reason,
            "skipping parameter"
        );
    }
    report.push(outcome);
}

impl From<Denied> for SkipReason {
    fn from(denied: Denied) -> Self {
        match denied {
            Denied::NotAllowed => SkipReason::NotAllowed,
            Denied::BudgetExhausted => SkipReason::BudgetExhausted,
            Denied::Rejected(violation) => SkipReason::Rejected(violation),
        }
    }
}
