use crate::domain::Token;

/// Aggregates shown in the overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketSummary {
    pub token_count: usize,
    /// Mean velocity, missing values counted as zero. Zero for an empty list.
    pub average_velocity: f64,
    pub total_market_cap: f64,
    pub total_volume_24h: f64,
}

impl MarketSummary {
    pub fn from_tokens(tokens: &[Token], currency: &str) -> Self {
        if tokens.is_empty() {
            return Self::default();
        }

        let mut velocity_sum = 0.0;
        let mut total_market_cap = 0.0;
        let mut total_volume_24h = 0.0;
        for token in tokens {
            let quote = token.quote_or_empty(currency);
            velocity_sum += quote.velocity.unwrap_or(0.0);
            total_market_cap += quote.market_cap.unwrap_or(0.0);
            total_volume_24h += quote.volume_24h.unwrap_or(0.0);
        }

        Self {
            token_count: tokens.len(),
            average_velocity: velocity_sum / tokens.len() as f64,
            total_market_cap,
            total_volume_24h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;
    use std::collections::BTreeMap;

    fn token(id: u64, quote: Option<Quote>) -> Token {
        let mut quotes = BTreeMap::new();
        if let Some(quote) = quote {
            quotes.insert("USD".to_string(), quote);
        }
        Token {
            id,
            cmc_id: None,
            symbol: format!("T{}", id),
            name: format!("Token {}", id),
            slug: None,
            quote: quotes,
            last_updated: None,
        }
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(MarketSummary::from_tokens(&[], "USD"), MarketSummary::default());
    }

    #[test]
    fn missing_values_count_as_zero() {
        let tokens = vec![
            token(
                1,
                Some(Quote {
                    velocity: Some(0.3),
                    market_cap: Some(1_000.0),
                    volume_24h: Some(50.0),
                    ..Default::default()
                }),
            ),
            token(
                2,
                Some(Quote {
                    velocity: None,
                    market_cap: Some(500.0),
                    ..Default::default()
                }),
            ),
            token(3, None),
        ];
        let summary = MarketSummary::from_tokens(&tokens, "USD");
        assert_eq!(summary.token_count, 3);
        assert!((summary.average_velocity - 0.1).abs() < 1e-12);
        assert_eq!(summary.total_market_cap, 1_500.0);
        assert_eq!(summary.total_volume_24h, 50.0);
    }
}
