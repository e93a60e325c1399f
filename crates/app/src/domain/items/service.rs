//! Items service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        access::{Action, Principal, authorize},
        items::{
            data::{ItemUpdate, ItemsQuery, NewItem},
            errors::ItemsServiceError,
            records::{ItemRecord, ItemUuid, ItemsPage},
            repository::PgItemsRepository,
        },
        users::repository::PgUsersRepository,
    },
    notifications::{NotificationSender, new_item_notifications},
};

#[derive(Clone)]
pub struct PgItemsService {
    db: Db,
    repository: PgItemsRepository,
    users: PgUsersRepository,
    notifier: Arc<dyn NotificationSender>,
    site_url: String,
}

impl PgItemsService {
    /// `site_url` is the public storefront address used in announcement links.
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn NotificationSender>, site_url: impl Into<String>) -> Self {
        Self {
            db,
            repository: PgItemsRepository::new(),
            users: PgUsersRepository::new(),
            notifier,
            site_url: site_url.into(),
        }
    }
}

impl fmt::Debug for PgItemsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgItemsService")
            .field("db", &self.db)
            .field("site_url", &self.site_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ItemsService for PgItemsService {
    async fn list_items(&self, query: ItemsQuery) -> Result<ItemsPage, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let (items, count) = self.repository.list_items(&mut tx, &query).await?;

        tx.commit().await?;

        let count = u64::try_from(count).unwrap_or_default();

        Ok(ItemsPage {
            items,
            count,
            num_pages: query.page.num_pages(count),
        })
    }

    async fn get_item(&self, item: ItemUuid) -> Result<ItemRecord, ItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_item(
        &self,
        principal: &Principal,
        item: NewItem,
    ) -> Result<ItemRecord, ItemsServiceError> {
        authorize(Some(principal), Action::CreateItem, None)?;

        item.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_item(&mut tx, &item).await?;
        let recipients = self.users.list_new_item_subscribers(&mut tx).await?;

        tx.commit().await?;

        info!(item = %created.uuid, recipients = recipients.len(), "item created");

        let notifications = new_item_notifications(&self.site_url, &created, recipients);

        if !notifications.is_empty() {
            self.notifier.send(notifications).await.map_err(|error| {
                warn!(item = %created.uuid, %error, "new item notifications failed");
                ItemsServiceError::from(error)
            })?;
        }

        Ok(created)
    }

    async fn update_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<ItemRecord, ItemsServiceError> {
        authorize(Some(principal), Action::UpdateItem, None)?;

        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_item(&mut tx, item, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<(), ItemsServiceError> {
        authorize(Some(principal), Action::DeleteItem, None)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(ItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// One filtered, ordered page of the catalog.
    async fn list_items(&self, query: ItemsQuery) -> Result<ItemsPage, ItemsServiceError>;

    async fn get_item(&self, item: ItemUuid) -> Result<ItemRecord, ItemsServiceError>;

    /// Create an available item and announce it to subscribed users.
    ///
    /// The item stays created when the announcement fails; the failure is
    /// still returned.
    async fn create_item(
        &self,
        principal: &Principal,
        item: NewItem,
    ) -> Result<ItemRecord, ItemsServiceError>;

    async fn update_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
        update: ItemUpdate,
    ) -> Result<ItemRecord, ItemsServiceError>;

    /// Hard delete. Carts drop the item; placed orders keep its id.
    async fn delete_item(&self, principal: &Principal, item: ItemUuid)
    -> Result<(), ItemsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            access::AccessError,
            items::{
                data::{ItemOrdering, Page},
                records::ItemStatus,
            },
        },
        notifications::{MockNotificationSender, NEW_ITEM_SUBJECT, NotificationError},
        test::{
            TestContext,
            helpers::{create_item, create_subscriber, create_user, new_item},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_item_starts_available() -> TestResult {
        let ctx = TestContext::new().await;

        let item = create_item(&ctx, "Kilim", "4.99").await?;

        assert_eq!(item.status, ItemStatus::Available);
        assert_eq!(item.price, Decimal::new(499, 2));
        assert_eq!(ctx.items.get_item(item.uuid).await?, item);

        Ok(())
    }

    #[tokio::test]
    async fn regular_users_cannot_mutate_the_catalog() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "weaver", false).await?;
        let principal = Principal::user(user.uuid);

        let result = ctx
            .items
            .create_item(&principal, new_item("Kilim", "4.99"))
            .await;

        assert!(matches!(
            result,
            Err(ItemsServiceError::Access(AccessError::Forbidden))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_item_is_rejected_before_storage() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .items
            .create_item(&ctx.admin, new_item("Kilim", "4.999"))
            .await;

        assert!(matches!(result, Err(ItemsServiceError::Validation(_))));
        assert_eq!(ctx.items.list_items(ItemsQuery::default()).await?.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_is_partial_and_can_clear_image() -> TestResult {
        let ctx = TestContext::new().await;
        let mut new = new_item("Kilim", "4.99");
        new.image_url = Some("https://cdn.example.com/kilim.jpg".to_string());
        let item = ctx.items.create_item(&ctx.admin, new).await?;

        let updated = ctx
            .items
            .update_item(
                &ctx.admin,
                item.uuid,
                ItemUpdate {
                    price: Some(Decimal::new(599, 2)),
                    image_url: Some(None),
                    status: Some(ItemStatus::NotAvailable),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.title, "Kilim");
        assert_eq!(updated.price, Decimal::new(599, 2));
        assert_eq!(updated.image_url, None);
        assert_eq!(updated.status, ItemStatus::NotAvailable);
        assert_eq!(updated.created_at, item.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .items
            .update_item(&ctx.admin, ItemUuid::new(), ItemUpdate::default())
            .await;

        assert!(matches!(result, Err(ItemsServiceError::NotFound)));
    }

    #[tokio::test]
    async fn delete_item_removes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.items.delete_item(&ctx.admin, item.uuid).await?;

        assert!(matches!(
            ctx.items.get_item(item.uuid).await,
            Err(ItemsServiceError::NotFound)
        ));
        assert!(matches!(
            ctx.items.delete_item(&ctx.admin, item.uuid).await,
            Err(ItemsServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_searches_and_orders() -> TestResult {
        let ctx = TestContext::new().await;

        let kilim = create_item(&ctx, "Kilim", "4.99").await?;
        let persian = create_item(&ctx, "Persian", "99.00").await?;
        let runner = create_item(&ctx, "Hall runner", "15.50").await?;

        ctx.items
            .update_item(
                &ctx.admin,
                runner.uuid,
                ItemUpdate {
                    status: Some(ItemStatus::NotAvailable),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        let newest_first = ctx.items.list_items(ItemsQuery::default()).await?;
        let uuids: Vec<_> = newest_first.items.iter().map(|item| item.uuid).collect();

        assert_eq!(uuids, vec![runner.uuid, persian.uuid, kilim.uuid]);
        assert_eq!(newest_first.count, 3);

        let available_by_price = ctx
            .items
            .list_items(ItemsQuery {
                status: Some(ItemStatus::Available),
                ordering: ItemOrdering::PriceDesc,
                ..ItemsQuery::default()
            })
            .await?;
        let uuids: Vec<_> = available_by_price.items.iter().map(|item| item.uuid).collect();

        assert_eq!(uuids, vec![persian.uuid, kilim.uuid]);

        let search = ctx
            .items
            .list_items(ItemsQuery {
                search: Some("PERS".to_string()),
                ..ItemsQuery::default()
            })
            .await?;

        assert_eq!(search.count, 1);
        assert_eq!(search.items[0].uuid, persian.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn list_paginates() -> TestResult {
        let ctx = TestContext::new().await;

        for title in ["A", "B", "C", "D", "E"] {
            create_item(&ctx, title, "1.00").await?;
        }

        let page = ctx
            .items
            .list_items(ItemsQuery {
                ordering: ItemOrdering::TitleAsc,
                page: Page::new(Some(2), Some(2)),
                ..ItemsQuery::default()
            })
            .await?;

        let titles: Vec<_> = page.items.iter().map(|item| item.title.as_str()).collect();

        assert_eq!(titles, vec!["C", "D"]);
        assert_eq!(page.count, 5);
        assert_eq!(page.num_pages, 3);

        Ok(())
    }

    #[tokio::test]
    async fn new_item_is_announced_once_to_each_subscriber() -> TestResult {
        let ctx = TestContext::new().await;

        create_subscriber(&ctx, "alice", true).await?;
        create_subscriber(&ctx, "bob", true).await?;
        create_subscriber(&ctx, "carol", false).await?;

        let mut notifier = MockNotificationSender::new();

        notifier
            .expect_send()
            .withf(|batch| {
                let mut recipients: Vec<_> =
                    batch.iter().map(|n| n.recipient.as_str()).collect();
                recipients.sort_unstable();

                recipients == ["alice@example.com", "bob@example.com"]
                    && batch.iter().all(|n| n.subject == NEW_ITEM_SUBJECT)
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = PgItemsService::new(ctx.database(), Arc::new(notifier), "https://rugs.test");

        service
            .create_item(&ctx.admin, new_item("Kilim", "4.99"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn no_subscribers_means_no_send() -> TestResult {
        let ctx = TestContext::new().await;
        create_subscriber(&ctx, "carol", false).await?;

        let mut notifier = MockNotificationSender::new();
        notifier.expect_send().never();

        let service = PgItemsService::new(ctx.database(), Arc::new(notifier), "https://rugs.test");

        service
            .create_item(&ctx.admin, new_item("Kilim", "4.99"))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_announcement_is_reported_but_item_is_kept() -> TestResult {
        let ctx = TestContext::new().await;
        create_subscriber(&ctx, "alice", true).await?;

        let mut notifier = MockNotificationSender::new();
        notifier
            .expect_send()
            .times(1)
            .returning(|_| Err(NotificationError::Rejected("relay down".to_string())));

        let service = PgItemsService::new(ctx.database(), Arc::new(notifier), "https://rugs.test");

        let result = service
            .create_item(&ctx.admin, new_item("Kilim", "4.99"))
            .await;

        assert!(matches!(result, Err(ItemsServiceError::Notification(_))));
        assert_eq!(ctx.items.list_items(ItemsQuery::default()).await?.count, 1);

        Ok(())
    }
}
