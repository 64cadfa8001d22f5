//! Project board card filtering

use crate::error::{Error, Result};
use crate::types::{ProjectCard, RepoIdentity};
use tracing::info;

/// Segments in `https://api.github.com/repos/<owner>/<repo>/issues/<n>` split on `/`
const CARD_URL_SEGMENTS: usize = 8;

/// PR numbers referenced by `cards` that belong to `repo`
///
/// Note-only cards and cards from other repositories are skipped. A content
/// URL of any other shape is an error: the board's schema changed under us
/// and the run must stop rather than silently drop cards.
pub fn filter_cards(cards: &[ProjectCard], repo: &RepoIdentity) -> Result<Vec<u64>> {
    let mut numbers = Vec::new();

    for card in cards {
        let Some(url) = card.content_url.as_deref().filter(|u| !u.is_empty()) else {
            info!(card_id = card.id, "card has no content reference, skipping");
            continue;
        };

        let segments: Vec<&str> = url.split('/').collect();
        if segments.len() != CARD_URL_SEGMENTS {
            return Err(Error::MalformedCardReference {
                url: url.to_string(),
                segments: segments.len(),
            });
        }

        let card_repo = segments[CARD_URL_SEGMENTS - 3];
        if !card_repo.eq_ignore_ascii_case(&repo.name) {
            info!(
                card_id = card.id,
                card_repo, "card belongs to another repository, skipping"
            );
            continue;
        }

        let number = segments[CARD_URL_SEGMENTS - 1]
            .parse()
            .map_err(|_| Error::MalformedCardReference {
                url: url.to_string(),
                segments: segments.len(),
            })?;
        numbers.push(number);
    }

    Ok(numbers)
}
