use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::catalogue;
use crate::client::ReleaseInfoResolver;
use crate::error::CheckError;
use crate::notifier::Notifier;
use crate::report::CheckReport;
use crate::rule::{is_near_end_of_life, LookaheadWindow};
use crate::types::Catalogue;

/// Where the catalogue is read from at the start of each run.
#[derive(Debug, Clone)]
pub enum CatalogueSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl CatalogueSource {
    fn load(&self) -> Result<Catalogue, CheckError> {
        let catalogue = match self {
            CatalogueSource::Path(path) => catalogue::load_from_path(path)?,
            CatalogueSource::Bytes(bytes) => catalogue::load(bytes)?,
        };
        Ok(catalogue)
    }
}

impl From<PathBuf> for CatalogueSource {
    fn from(path: PathBuf) -> Self {
        CatalogueSource::Path(path)
    }
}

/// Runs one check pass: load the catalogue, resolve every product in order and notify
/// for those near end of life. The first load, resolve or date error ends the run.
pub struct CatalogueChecker<'a> {
    source: CatalogueSource,
    resolver: &'a dyn ReleaseInfoResolver,
    notifier: &'a dyn Notifier,
    window: LookaheadWindow,
}

impl<'a> CatalogueChecker<'a> {
    pub fn new(
        source: CatalogueSource,
        resolver: &'a dyn ReleaseInfoResolver,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            source,
            resolver,
            notifier,
            window: LookaheadWindow::default(),
        }
    }

    pub fn with_window(mut self, window: LookaheadWindow) -> Self {
        self.window = window;
        self
    }

    pub async fn notify_near_end_of_life(&self) -> Result<CheckReport, CheckError> {
        self.run(Utc::now()).await
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<CheckReport, CheckError> {
        let catalogue = self.source.load()?;
        info!(
            "checking {} products (end of life before {})",
            catalogue.len(),
            self.window.deadline(now)
        );

        let mut report = CheckReport::new();
        for product in catalogue {
            let release_info = self.resolver.fetch_release_info(&product).await?;
            debug!(
                "{}: released {}, end of life {}",
                product, release_info.release_date, release_info.end_of_life_date
            );

            let near_eol = is_near_end_of_life(&release_info, now, self.window).map_err(|source| {
                CheckError::DateFormat {
                    product: product.to_string(),
                    source,
                }
            })?;

            if near_eol {
                info!(
                    "product is near end of life: product={} version={} eol={} release={}",
                    product.name, product.version, release_info.end_of_life_date, release_info.release_date
                );
                self.notifier.notify(&product, &release_info).await;
            } else {
                debug!("{} is not near end of life", product);
            }

            report.record(product, release_info, near_eol);
        }

        info!(
            "check finished: {} products checked, {} near end of life",
            report.checked_count(),
            report.near_end_of_life_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::types::{Product, ReleaseInfo};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FixedResolver {
        info: ReleaseInfo,
    }

    #[async_trait]
    impl ReleaseInfoResolver for FixedResolver {
        async fn fetch_release_info(&self, _product: &Product) -> Result<ReleaseInfo, ResolveError> {
            Ok(self.info.clone())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notified: Mutex<Vec<Product>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, product: &Product, _info: &ReleaseInfo) {
            self.notified.lock().unwrap().push(product.clone());
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn source(json: &str) -> CatalogueSource {
        CatalogueSource::Bytes(json.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn test_notifies_in_catalogue_order() {
        let resolver = FixedResolver {
            info: ReleaseInfo::new("2019-05-01", "2024-02-26"),
        };
        let notifier = RecordingNotifier::default();
        let checker = CatalogueChecker::new(
            source(r#"{"catalogue": [{"name": "b", "version": "2"}, {"name": "a", "version": "1"}]}"#),
            &resolver,
            &notifier,
        );

        let report = checker.run(now()).await.unwrap();

        let notified = notifier.notified.lock().unwrap();
        assert_eq!(*notified, vec![Product::new("b", "2"), Product::new("a", "1")]);
        assert_eq!(report.checked_count(), 2);
        assert_eq!(report.near_end_of_life_count(), 2);
    }

    #[tokio::test]
    async fn test_custom_window_changes_decision() {
        let resolver = FixedResolver {
            info: ReleaseInfo::new("2023-01-01", "2024-05-15"),
        };
        let notifier = RecordingNotifier::default();
        let checker = CatalogueChecker::new(
            source(r#"{"catalogue": [{"name": "a", "version": "1"}]}"#),
            &resolver,
            &notifier,
        )
        .with_window(LookaheadWindow::months(1));

        let report = checker.run(now()).await.unwrap();

        assert!(!report.has_issues());
        assert!(notifier.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_date_aborts_run() {
        let resolver = FixedResolver {
            info: ReleaseInfo::new("2019-05-01", "soon"),
        };
        let notifier = RecordingNotifier::default();
        let checker = CatalogueChecker::new(
            source(r#"{"catalogue": [{"name": "a", "version": "1"}]}"#),
            &resolver,
            &notifier,
        );

        let err = checker.run(now()).await.unwrap_err();

        match err {
            CheckError::DateFormat { product, source } => {
                assert_eq!(product, "a 1");
                assert_eq!(source.value, "soon");
            }
            other => panic!("expected date format error, got {:?}", other),
        }
        assert!(notifier.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_catalogue_aborts_run() {
        let resolver = FixedResolver {
            info: ReleaseInfo::new("2019-05-01", "2024-02-26"),
        };
        let notifier = RecordingNotifier::default();
        let checker = CatalogueChecker::new(source(r#"{"catalogue": "#), &resolver, &notifier);

        let result = checker.run(now()).await;
        assert!(matches!(result, Err(CheckError::Load(_))));
    }
}
