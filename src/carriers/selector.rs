use crate::carriers::{CarrierQuote, RateRequest, RateSource};
use std::sync::Arc;

/// Explicit two-source fallback chain: the Pricing Engine first, the legacy
/// rate table when it errors, times out, or reports no route. Total failure
/// is non-fatal for the caller — the location decision stands without a
/// carrier recommendation.
pub struct CarrierSelector {
    pub primary: Arc<dyn RateSource>,
    pub fallback: Arc<dyn RateSource>,
}

impl CarrierSelector {
    pub async fn select(&self, request: &RateRequest) -> Option<CarrierQuote> {
        match self.primary.quote(request).await {
            Ok(Some(quote)) => return Some(quote),
            Ok(None) => {
                tracing::info!(
                    source = self.primary.name(),
                    origin = %request.origin_location_code,
                    destination = %request.destination_postal_code,
                    "no route from primary rate source, trying fallback"
                );
            }
            Err(e) => {
                tracing::warn!(
                    source = self.primary.name(),
                    error = %e,
                    "primary rate source failed, trying fallback"
                );
            }
        }

        match self.fallback.quote(request).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(
                    source = self.fallback.name(),
                    error = %e,
                    "fallback rate source failed, proceeding without carrier"
                );
                None
            }
        }
    }
}
