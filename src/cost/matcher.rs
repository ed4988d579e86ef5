use crate::domain::Product;

/// Picks the catalog products that may be the same thing as a recipe ingredient.
///
/// Implementations favour recall: the optimizer discards candidates whose unit
/// cannot be compared, so false positives are cheap.
pub trait MatchStrategy {
    fn candidates<'a>(&self, ingredient_name: &str, catalog: &'a [Product]) -> Vec<&'a Product>;
}

/// Case-insensitive substring matching in both directions.
///
/// A product matches when its name contains the whole ingredient name, when the
/// ingredient name contains the product's first word, or when the product
/// name contains the ingredient's first word. A blank ingredient name matches
/// nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl MatchStrategy for SubstringMatcher {
    fn candidates<'a>(&self, ingredient_name: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
        let ingredient = ingredient_name.trim().to_lowercase();
        let Some(keyword) = ingredient.split_whitespace().next() else {
            return Vec::new();
        };

        catalog
            .iter()
            .filter(|product| {
                let name = product.name.to_lowercase();
                let leading = name.split_whitespace().next();
                name.contains(&ingredient)
                    || leading.is_some_and(|word| ingredient.contains(word))
                    || name.contains(keyword)
            })
            .collect()
    }
}

/// Candidates for `ingredient_name` using the default [`SubstringMatcher`].
pub fn find_candidates<'a>(ingredient_name: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
    SubstringMatcher.candidates(ingredient_name, catalog)
}
