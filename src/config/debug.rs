//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so debug
//! builds stay reasonably quiet. All of them are further gated by
//! `cfg(debug_assertions)` at the call sites.

pub struct DebugFlags {
    /// Emit UI interaction logs (selection changes, reload clicks).
    pub print_ui_interactions: bool,
    /// Emit per-run loader details (format, header mapping, skipped rows).
    pub print_loader_details: bool,
    /// Emit forecaster diagnostics (changepoints, seasonal terms, residual sigma).
    pub print_fit_diagnostics: bool,
    /// Emit pipeline scheduling decisions (queued follow-up runs etc.).
    pub print_pipeline_scheduling: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_loader_details: false,
    print_fit_diagnostics: false,
    print_pipeline_scheduling: false,
    print_shutdown: false,
};
