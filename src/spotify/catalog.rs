use reqwest::StatusCode;

use crate::{
    config,
    spotify::RetryClient,
    types::{Artist, GenreSeedsResponse, SearchArtistsResponse, TopTracksResponse, Track},
    warning,
};

/// Retrieves the list of available genre seeds.
///
/// Any failure - transport, error status, undecodable body - degrades to
/// an empty list; callers fall back to a static genre list.
pub async fn available_genres(client: &RetryClient, token: &str) -> Vec<String> {
    let url = format!(
        "{uri}/recommendations/available-genre-seeds",
        uri = &config::spotify_apiurl()
    );

    match client.get(&url, Some(token)).await {
        Ok(resp) if resp.status() == StatusCode::OK => resp
            .json::<GenreSeedsResponse>()
            .await
            .map(|r| r.genres)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Searches artists by genre, paginating with an offset cursor until
/// `limit` artists are collected or the upstream runs out of results.
///
/// Each page requests `min(page_size, limit - collected)`. Pagination stops
/// on an empty page, on a short page (fewer items than requested signals
/// the end of upstream results), or on any failed request - in that case
/// the partial result collected so far is returned, never an error. The
/// offset advances by the number of items actually returned because the
/// upstream may return fewer than requested.
pub async fn search_artists_by_genre(
    client: &RetryClient,
    genre: &str,
    token: &str,
    limit: usize,
    page_size: usize,
) -> Vec<Artist> {
    let mut collected: Vec<Artist> = Vec::new();
    let mut offset = 0usize;

    while collected.len() < limit {
        let to_request = page_size.min(limit - collected.len());
        let url = format!(
            "{uri}/search?q=genre:%22{genre}%22&type=artist&limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            genre = genre,
            limit = to_request,
            offset = offset
        );

        let resp = match client.get(&url, Some(token)).await {
            Ok(resp) => resp,
            Err(e) => {
                warning!("Artist search request failed, stopping pagination: {}", e);
                break;
            }
        };

        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            warning!("Artist search returned an error: {}", body);
            break;
        }

        let page = match resp.json::<SearchArtistsResponse>().await {
            Ok(page) => page,
            Err(e) => {
                warning!("Failed to decode artist search response: {}", e);
                break;
            }
        };

        let items = page.artists.items;
        if items.is_empty() {
            break;
        }

        let returned = items.len();
        collected.extend(items);
        offset += returned;

        if returned < to_request {
            break;
        }
    }

    collected.truncate(limit);
    collected
}

/// Fetches the top tracks for one artist in the given market.
///
/// Failures degrade to an empty list with the upstream body logged.
pub async fn top_tracks(
    client: &RetryClient,
    artist_id: &str,
    token: &str,
    market: &str,
) -> Vec<Track> {
    let url = format!(
        "{uri}/artists/{artist_id}/top-tracks?market={market}",
        uri = &config::spotify_apiurl(),
        artist_id = artist_id,
        market = market
    );

    match client.get(&url, Some(token)).await {
        Ok(resp) if resp.status() == StatusCode::OK => resp
            .json::<TopTracksResponse>()
            .await
            .map(|r| r.tracks)
            .unwrap_or_default(),
        Ok(resp) => {
            let body = resp.text().await.unwrap_or_default();
            warning!("Failed to fetch top tracks for {}: {}", artist_id, body);
            Vec::new()
        }
        Err(e) => {
            warning!("Failed to fetch top tracks for {}: {}", artist_id, e);
            Vec::new()
        }
    }
}
