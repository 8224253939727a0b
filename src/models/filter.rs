use crate::domain::Token;

/// Case-insensitive substring match on name or symbol. An empty query matches everything.
pub fn matches(token: &Token, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    token.name.to_lowercase().contains(&needle) || token.symbol.to_lowercase().contains(&needle)
}

/// Tokens matching `query`, in list order.
pub fn filter_tokens<'a>(tokens: &'a [Token], query: &str) -> Vec<&'a Token> {
    tokens.iter().filter(|t| matches(t, query)).collect()
}
