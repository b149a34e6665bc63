use crate::domain::product::ListingOutcome;
use crate::domain::types::PageLimit;
use crate::forms::listing::{ListingForm, ListingFormPayload};
use crate::forms::search::{SearchForm, SearchFormPayload};
use crate::repository::ProductReader;
use crate::services::catalog::ProductCatalog;

use super::{ServiceError, ServiceResult};

/// Core logic of the `/api/products` endpoint.
pub async fn list_products<R>(
    catalog: &ProductCatalog<R>,
    form: ListingForm,
) -> ServiceResult<ListingOutcome>
where
    R: ProductReader,
{
    let query = ListingFormPayload::try_from(form)?.into_query(PageLimit::DEFAULT);
    Ok(catalog.get_product_list(query.page, query.limit).await)
}

/// Core logic of the `/api/products/featured` endpoint.
pub async fn list_featured_products<R>(
    catalog: &ProductCatalog<R>,
    form: ListingForm,
) -> ServiceResult<ListingOutcome>
where
    R: ProductReader,
{
    let query = ListingFormPayload::try_from(form)?.into_query(PageLimit::FEATURED);
    Ok(catalog.get_featured_products(query.page, query.limit).await)
}

/// Core logic of the `/api/products/{category}` endpoint.
///
/// Categories outside the configured set are reported as
/// [`ServiceError::NotFound`] without contacting the upstream.
pub async fn list_category_products<R>(
    catalog: &ProductCatalog<R>,
    category: &str,
    form: ListingForm,
) -> ServiceResult<ListingOutcome>
where
    R: ProductReader,
{
    let query = ListingFormPayload::try_from(form)?.into_query(PageLimit::DEFAULT);
    let Some(category) = catalog.find_category(category) else {
        return Err(ServiceError::NotFound);
    };

    Ok(catalog
        .get_product_category(category, query.page, query.limit)
        .await)
}

/// Core logic of the `/api/search` endpoint.
pub async fn search_products<R>(
    catalog: &ProductCatalog<R>,
    form: SearchForm,
) -> ServiceResult<ListingOutcome>
where
    R: ProductReader,
{
    let payload = SearchFormPayload::try_from(form)?;
    let category = match &payload.category {
        Some(slug) => match catalog.find_category(slug) {
            Some(category) => Some(category),
            None => return Err(ServiceError::NotFound),
        },
        None => None,
    };

    Ok(catalog.search(&payload.keywords, category).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Product, ProductListItem};
    use crate::domain::types::{CategorySlug, ProductIdentifier};
    use crate::repository::test::TestRepository;
    use crate::services::retry::RetryPolicy;

    fn item(id: &str, category: &str) -> ProductListItem {
        ProductListItem {
            product: Product {
                identifier: ProductIdentifier::new(id).unwrap(),
                author: Some(format!("author of {id}")),
                created_at: None,
                category: Some(category.to_string()),
            },
            meta: Default::default(),
        }
    }

    fn catalog(repo: TestRepository) -> ProductCatalog<TestRepository> {
        ProductCatalog::new(
            repo,
            RetryPolicy::default(),
            vec![CategorySlug::new("life").unwrap()],
        )
    }

    #[tokio::test]
    async fn listing_uses_default_limit() {
        let items = (0..20).map(|i| item(&format!("p{i}"), "life")).collect();
        let catalog = catalog(TestRepository::new(items));

        let page = list_products(&catalog, ListingForm::default())
            .await
            .unwrap()
            .into_page();

        assert_eq!(page.data.len(), 12);
        assert_eq!(page.next_page, 2);
    }

    #[tokio::test]
    async fn featured_uses_featured_limit() {
        let featured = (0..5).map(|i| item(&format!("f{i}"), "life")).collect();
        let catalog = catalog(TestRepository::default().with_featured(featured));

        let page = list_featured_products(&catalog, ListingForm::default())
            .await
            .unwrap()
            .into_page();

        assert_eq!(page.data.len(), 3);
    }

    #[tokio::test]
    async fn invalid_limit_is_a_form_error() {
        let catalog = catalog(TestRepository::default());
        let form = ListingForm {
            page: None,
            limit: Some(0),
        };

        let result = list_products(&catalog, form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(catalog.repository().calls(), 0);
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let catalog = catalog(TestRepository::default());

        let result = list_category_products(&catalog, "unknown", ListingForm::default()).await;
        assert_eq!(result, Err(ServiceError::NotFound));

        let search = SearchForm {
            q: "chef".into(),
            category: Some("unknown".into()),
        };
        assert_eq!(
            search_products(&catalog, search).await,
            Err(ServiceError::NotFound)
        );
        assert_eq!(catalog.repository().calls(), 0);
    }

    #[tokio::test]
    async fn search_filters_within_category() {
        let catalog = catalog(TestRepository::new(vec![
            item("chef", "life"),
            item("coder", "games"),
        ]));
        let form = SearchForm {
            q: "author".into(),
            category: Some("life".into()),
        };

        let page = search_products(&catalog, form).await.unwrap().into_page();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].product.identifier, "chef");
    }
}
