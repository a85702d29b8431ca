//! Query planning: fixed-template variants of one claim.

/// Query templates, in priority order. `{}` is replaced by the claim.
const QUERY_TEMPLATES: &[&str] = &[
    "\"{}\" fact check",
    "{} true or false",
    "{} verified",
    "{} debunked myth",
    "{} Reuters fact check",
    "{} AP news fact check",
    "{} Snopes",
    "is it true that {}",
];

/// Number of variants produced per claim.
pub const QUERY_VARIANTS: usize = QUERY_TEMPLATES.len();

/// Derive the ordered search queries for `claim`.
///
/// The claim is trimmed first. Output is fully determined by the input:
/// no randomness and no network access.
pub fn generate_search_queries(claim: &str) -> Vec<String> {
    let claim = claim.trim();
    QUERY_TEMPLATES
        .iter()
        .map(|template| template.replacen("{}", claim, 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_eight_variants_in_order() {
        let queries = generate_search_queries("the earth is flat");
        assert_eq!(queries.len(), QUERY_VARIANTS);
        assert_eq!(
            queries,
            vec![
                "\"the earth is flat\" fact check",
                "the earth is flat true or false",
                "the earth is flat verified",
                "the earth is flat debunked myth",
                "the earth is flat Reuters fact check",
                "the earth is flat AP news fact check",
                "the earth is flat Snopes",
                "is it true that the earth is flat",
            ]
        );
    }

    #[test]
    fn claim_is_trimmed() {
        let queries = generate_search_queries("  vaccines cause autism \n");
        assert_eq!(queries[0], "\"vaccines cause autism\" fact check");
        assert_eq!(queries[7], "is it true that vaccines cause autism");
    }

    #[test]
    fn braces_in_claim_are_kept_verbatim() {
        let queries = generate_search_queries("x {} y");
        assert_eq!(queries[1], "x {} y true or false");
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            generate_search_queries("water boils at 100C"),
            generate_search_queries("water boils at 100C")
        );
    }
}
