//! Advertisement management for platform administrators.

use std::{fmt, sync::Arc};

use tracing::{info, warn};

use achei::{
    advertisements::{Advertisement, AdvertisementUuid},
    stores::AccountUuid,
};

use crate::{
    admin::{AdminError, drafts::AdvertisementDraft},
    context::AppContext,
    domain::advertisements::AdvertisementsService,
};

/// Carousel management, only handed out to accounts with the admin role.
#[derive(Clone)]
pub struct AdvertisementDesk {
    advertisements: Arc<dyn AdvertisementsService>,
    account: AccountUuid,
}

impl fmt::Debug for AdvertisementDesk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvertisementDesk")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl AdvertisementDesk {
    /// Open the desk for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotAdmin`] if the account lacks the admin role, or
    /// an error if the role lookup fails.
    pub async fn open(
        advertisements: Arc<dyn AdvertisementsService>,
        account: AccountUuid,
    ) -> Result<Self, AdminError> {
        if !advertisements.is_admin(account).await? {
            warn!(account_id = %account, "advertisement access denied");

            return Err(AdminError::NotAdmin(account));
        }

        Ok(Self {
            advertisements,
            account,
        })
    }

    /// Open the desk over the context's advertisements service.
    ///
    /// # Errors
    ///
    /// See [`AdvertisementDesk::open`].
    pub async fn from_context(
        context: &AppContext,
        account: AccountUuid,
    ) -> Result<Self, AdminError> {
        Self::open(Arc::clone(&context.advertisements), account).await
    }

    /// Every advertisement, shown or not, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend request fails.
    pub async fn list(&self) -> Result<Vec<Advertisement>, AdminError> {
        Ok(self.advertisements.list_advertisements().await?)
    }

    /// Add a banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backend rejects it.
    pub async fn create(&self, draft: AdvertisementDraft) -> Result<Advertisement, AdminError> {
        let advertisement = draft.validate()?;

        Ok(self
            .advertisements
            .create_advertisement(advertisement)
            .await?)
    }

    /// Flip whether a banner is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner does not exist or the backend rejects the change.
    pub async fn toggle(
        &self,
        advertisement: AdvertisementUuid,
    ) -> Result<Advertisement, AdminError> {
        let current = self.advertisements.get_advertisement(advertisement).await?;

        let updated = self
            .advertisements
            .set_active(advertisement, !current.is_active)
            .await?;

        info!(
            account_id = %self.account,
            advertisement_id = %advertisement,
            is_active = updated.is_active,
            "toggled advertisement"
        );

        Ok(updated)
    }

    /// Remove a banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the banner does not exist or the backend rejects the delete.
    pub async fn delete(&self, advertisement: AdvertisementUuid) -> Result<(), AdminError> {
        Ok(self
            .advertisements
            .delete_advertisement(advertisement)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use achei::advertisements::{DEFAULT_CTA, NewAdvertisement};
    use testresult::TestResult;

    use crate::{
        admin::DraftError,
        domain::advertisements::{AdvertisementsServiceError, MockAdvertisementsService},
    };

    use super::*;

    fn stored(advertisement: NewAdvertisement) -> Advertisement {
        Advertisement {
            id: AdvertisementUuid::new(),
            title: advertisement.title,
            subtitle: advertisement.subtitle,
            cta_text: advertisement.cta_text,
            gradient: advertisement.gradient,
            image_url: advertisement.image_url,
            is_active: advertisement.is_active,
            display_order: advertisement.display_order,
            store_id: advertisement.store_id,
            created_at: None,
        }
    }

    fn admin_service() -> MockAdvertisementsService {
        let mut advertisements = MockAdvertisementsService::new();
        advertisements
            .expect_is_admin()
            .once()
            .return_once(|_| Ok(true));

        advertisements
    }

    fn banner() -> AdvertisementDraft {
        AdvertisementDraft {
            title: "Parcele em até 12x".to_string(),
            subtitle: "Sem juros no cartão".to_string(),
            ..AdvertisementDraft::default()
        }
    }

    #[tokio::test]
    async fn non_admins_are_turned_away() -> TestResult {
        let account = AccountUuid::new();

        let mut advertisements = MockAdvertisementsService::new();
        advertisements
            .expect_is_admin()
            .once()
            .withf(move |id| *id == account)
            .return_once(|_| Ok(false));
        advertisements.expect_list_advertisements().never();

        let result = AdvertisementDesk::open(Arc::new(advertisements), account).await;

        assert!(matches!(result, Err(AdminError::NotAdmin(id)) if id == account));

        Ok(())
    }

    #[tokio::test]
    async fn create_sends_the_validated_banner() -> TestResult {
        let mut advertisements = admin_service();
        advertisements
            .expect_create_advertisement()
            .once()
            .withf(|ad| ad.title == "Parcele em até 12x" && ad.cta_text == DEFAULT_CTA)
            .return_once(|ad| Ok(stored(ad)));

        let desk = AdvertisementDesk::open(Arc::new(advertisements), AccountUuid::new()).await?;

        let created = desk.create(banner()).await?;

        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_banner_never_reaches_the_backend() -> TestResult {
        let mut advertisements = admin_service();
        advertisements.expect_create_advertisement().never();

        let desk = AdvertisementDesk::open(Arc::new(advertisements), AccountUuid::new()).await?;

        let result = desk
            .create(AdvertisementDraft {
                title: String::new(),
                ..banner()
            })
            .await;

        assert!(matches!(
            result,
            Err(AdminError::Draft(DraftError::Required { field: "title" }))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn toggle_flips_the_current_state() -> TestResult {
        let current = stored(banner().validate()?);
        let id = current.id;
        let hidden = Advertisement {
            is_active: false,
            ..current.clone()
        };

        let mut advertisements = admin_service();
        advertisements
            .expect_get_advertisement()
            .once()
            .withf(move |ad| *ad == id)
            .return_once(move |_| Ok(current));
        advertisements
            .expect_set_active()
            .once()
            .withf(move |ad, is_active| *ad == id && !is_active)
            .return_once(move |_, _| Ok(hidden));

        let desk = AdvertisementDesk::open(Arc::new(advertisements), AccountUuid::new()).await?;

        assert!(!desk.toggle(id).await?.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn toggling_a_missing_banner_changes_nothing() -> TestResult {
        let mut advertisements = admin_service();
        advertisements
            .expect_get_advertisement()
            .once()
            .return_once(|_| Err(AdvertisementsServiceError::NotFound));
        advertisements.expect_set_active().never();

        let desk = AdvertisementDesk::open(Arc::new(advertisements), AccountUuid::new()).await?;

        let result = desk.toggle(AdvertisementUuid::new()).await;

        assert!(matches!(
            result,
            Err(AdminError::Advertisements(AdvertisementsServiceError::NotFound))
        ));

        Ok(())
    }
}
