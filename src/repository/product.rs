use serde::Deserialize;
use serde_json::Value;

use crate::domain::product::{ListingQuery, ProductListItem, ProductListPage, ProductScope};
use crate::repository::{
    HttpProductRepository, ProductReader, RepositoryError, RepositoryResult, listing_url,
};

/// Listing page with rows left undecoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListingPage {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    next_page: u32,
}

/// Decodes a listing page row by row. Rows that break a field constraint are
/// skipped with a warning; only a malformed envelope is an error.
fn decode_listing(body: &[u8], url: &str) -> Result<ProductListPage, serde_json::Error> {
    let raw: RawListingPage = serde_json::from_slice(body)?;
    let data = raw
        .data
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<ProductListItem>(row) {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("Skipping listing row {index} from {url}: {err}");
                None
            }
        })
        .collect();

    Ok(ProductListPage {
        data,
        next_page: raw.next_page,
    })
}

impl ProductReader for HttpProductRepository {
    async fn list_products(
        &self,
        scope: &ProductScope,
        query: ListingQuery,
    ) -> RepositoryResult<ProductListPage> {
        let url = listing_url(self.base_url(), scope, query)?;

        if let Some(page) = self.cache.get(url.as_str()).await {
            log::debug!("Serving cached listing for {url}");
            return Ok(page);
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let page = decode_listing(&body, url.as_str())?;

        log::debug!("Fetched {} products from {url}", page.data.len());
        self.cache.insert(url.to_string(), page.clone()).await;

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, title: &str) -> Value {
        json!({
            "product": { "identifier": id },
            "meta": { "title": title },
        })
    }

    #[test]
    fn skips_rows_that_break_constraints() {
        let body = json!({
            "data": [
                row("chef", "Chef"),
                row("poet", &"x".repeat(256)),
                row("coder", "Coder"),
            ],
            "nextPage": 2,
        });

        let page = decode_listing(body.to_string().as_bytes(), "memory://products").unwrap();

        let ids: Vec<&str> = page
            .data
            .iter()
            .map(|item| item.product.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["chef", "coder"]);
        assert_eq!(page.next_page, 2);
    }

    #[test]
    fn skips_rows_without_identifier() {
        let body = json!({ "data": [{ "product": {} }, row("chef", "Chef")] });

        let page = decode_listing(body.to_string().as_bytes(), "memory://products").unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.next_page, 0);
    }

    #[test]
    fn rejects_malformed_envelope() {
        assert!(decode_listing(b"not json", "memory://products").is_err());
        assert!(decode_listing(br#"{"data": {}}"#, "memory://products").is_err());
    }
}
