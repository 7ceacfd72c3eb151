//! Redirect-or-preview decision for an incoming short URL visit.
//!
//! [`ResolvePolicy::decide`] is a pure function of the resolved record, the
//! request context and the policy configuration. Lookup and code decoding
//! happen in [`crate::application::services::ResolveService`].

use crate::domain::entities::ShortUrl;

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Redirect { url: String, permanent: bool },
    ShowPreview(ShortUrl),
    NotFound,
    InternalError,
}

/// Per-request inputs to the decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The visitor has the "always preview" preference cookie set.
    pub always_preview: bool,
    /// Host of the `Referer` header, if any.
    pub referer_host: Option<String>,
    /// Host the request was addressed to, if known.
    pub request_host: Option<String>,
}

/// Policy settings, normally built from [`crate::config::Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Host of this service; used when the request carries no `Host`.
    pub service_domain: String,
    /// Use 301 instead of 307 for redirects.
    pub permanent_redirect: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvePolicy {
    config: ResolveConfig,
}

impl ResolvePolicy {
    pub fn new(config: ResolveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Decides what to do with a found record.
    ///
    /// Preview wins only when the visitor asked for it and did not arrive
    /// from this service's own pages; the second condition keeps the
    /// "continue" link on the preview page from looping back to the preview.
    pub fn decide(&self, record: ShortUrl, ctx: &RequestContext) -> Action {
        if ctx.always_preview && !self.is_local_referer(ctx) {
            return Action::ShowPreview(record);
        }

        Action::Redirect {
            url: record.url,
            permanent: self.config.permanent_redirect,
        }
    }

    fn is_local_referer(&self, ctx: &RequestContext) -> bool {
        let serving_host = ctx
            .request_host
            .as_deref()
            .unwrap_or(&self.config.service_domain);

        ctx.referer_host
            .as_deref()
            .is_some_and(|referer| referer.eq_ignore_ascii_case(serving_host))
    }
}
