//! In-memory profile repository with single-flight lazy loading.
//!
//! State machine: `Unloaded -> Loading -> Loaded | LoadFailed`. The first
//! caller to find the repository `Unloaded` runs the load; every caller that
//! arrives while it is in flight blocks on a condition variable and observes
//! the same outcome. `Loaded` is never left. `LoadFailed` is only left by an
//! explicit [`ProfileRepository::load`].
//!
//! The collection is an immutable `Arc<[FilmProfile]>` snapshot. Favorite
//! toggles build a new snapshot and swap it in under the lock, so a reader
//! sees either all or none of a toggle.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::error::{LoadError, RepositoryError};
use crate::loader::CatalogLoader;
use crate::model::FilmProfile;

/// Immutable view of the catalog at one point in time.
pub type ProfileSnapshot = Arc<[FilmProfile]>;

enum LoadState {
    Unloaded,
    Loading,
    Loaded(ProfileSnapshot),
    LoadFailed(Arc<LoadError>),
}

/// Externally observable load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded { profiles: usize },
    LoadFailed,
}

/// Owns the authoritative profile collection.
pub struct ProfileRepository<L> {
    loader: L,
    state: Mutex<LoadState>,
    load_finished: Condvar,
}

impl<L: CatalogLoader> ProfileRepository<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            state: Mutex::new(LoadState::Unloaded),
            load_finished: Condvar::new(),
        }
    }

    /// Current load state, without triggering a load.
    pub fn status(&self) -> LoadStatus {
        match &*self.state.lock() {
            LoadState::Unloaded => LoadStatus::Unloaded,
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Loaded(profiles) => LoadStatus::Loaded {
                profiles: profiles.len(),
            },
            LoadState::LoadFailed(_) => LoadStatus::LoadFailed,
        }
    }

    /// Explicit load. Unlike the accessors, this retries after a failed
    /// attempt. A loaded catalog is returned as is.
    pub fn load(&self) -> Result<ProfileSnapshot, RepositoryError> {
        self.acquire(true)
    }

    /// Every profile, loading the catalog on first access.
    pub fn get_all_profiles(&self) -> Result<ProfileSnapshot, RepositoryError> {
        self.acquire(false)
    }

    /// Look up one profile, loading the catalog on first use.
    pub fn get_profile_by_id(&self, id: &str) -> Result<FilmProfile, RepositoryError> {
        self.acquire(false)?
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    /// Favorites in collection order, reflecting the latest toggle.
    pub fn get_favorite_profiles(&self) -> Result<Vec<FilmProfile>, RepositoryError> {
        Ok(self
            .acquire(false)?
            .iter()
            .filter(|p| p.is_favorite())
            .cloned()
            .collect())
    }

    /// Flip the favorite flag of profile `id` and return the updated profile.
    pub fn toggle_favorite(&self, id: &str) -> Result<FilmProfile, RepositoryError> {
        self.acquire(false)?;

        let mut state = self.state.lock();
        // Loaded is terminal, so this is the latest snapshot.
        let LoadState::Loaded(current) = &mut *state else {
            return Err(RepositoryError::NotFound { id: id.to_string() });
        };

        let index = current
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;
        let updated = current[index].toggle_favorite();

        let next: ProfileSnapshot = current
            .iter()
            .enumerate()
            .map(|(i, p)| if i == index { updated.clone() } else { p.clone() })
            .collect();
        *current = next;

        tracing::debug!("Profile {} favorite = {}", id, updated.is_favorite());
        Ok(updated)
    }

    /// Profiles whose name contains `query`, ignoring case, in collection
    /// order. A blank query returns everything.
    pub fn search_profiles(&self, query: &str) -> Result<Vec<FilmProfile>, RepositoryError> {
        let profiles = self.acquire(false)?;
        if query.trim().is_empty() {
            return Ok(profiles.to_vec());
        }

        let needle = query.to_lowercase();
        let hits: Vec<FilmProfile> = profiles
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        tracing::debug!("Search {:?} matched {} profile(s)", query, hits.len());
        Ok(hits)
    }

    /// Resolve the current snapshot, running the load if this caller is the
    /// first to need it.
    fn acquire(&self, retry_failed: bool) -> Result<ProfileSnapshot, RepositoryError> {
        let mut state = self.state.lock();
        let mut waited = false;
        loop {
            match &*state {
                LoadState::Loaded(profiles) => return Ok(Arc::clone(profiles)),
                // A caller that waited on an attempt observes its outcome
                // rather than starting another one.
                LoadState::LoadFailed(err) if !retry_failed || waited => {
                    return Err(RepositoryError::Load(Arc::clone(err)));
                }
                LoadState::Loading => {}
                LoadState::Unloaded | LoadState::LoadFailed(_) => break,
            }
            tracing::debug!("Waiting for in-flight profile load");
            self.load_finished.wait(&mut state);
            waited = true;
        }
        *state = LoadState::Loading;
        drop(state);

        self.run_load()
    }

    fn run_load(&self) -> Result<ProfileSnapshot, RepositoryError> {
        let mut reset = ResetOnUnwind {
            state: &self.state,
            load_finished: &self.load_finished,
            armed: true,
        };

        let (next, outcome) = match self.loader.load_catalog() {
            Ok(profiles) => {
                let snapshot: ProfileSnapshot = profiles.into();
                (LoadState::Loaded(Arc::clone(&snapshot)), Ok(snapshot))
            }
            Err(err) => {
                tracing::warn!("Film profile load failed: {}", err);
                let err = Arc::new(err);
                (
                    LoadState::LoadFailed(Arc::clone(&err)),
                    Err(RepositoryError::Load(err)),
                )
            }
        };

        *self.state.lock() = next;
        reset.armed = false;
        self.load_finished.notify_all();
        outcome
    }
}

/// Returns the state to `Unloaded` and wakes waiters if the loader panics,
/// so no caller blocks forever on a load that will never finish.
struct ResetOnUnwind<'a> {
    state: &'a Mutex<LoadState>,
    load_finished: &'a Condvar,
    armed: bool,
}

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.state.lock() = LoadState::Unloaded;
            self.load_finished.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ValidationReport, Violation};
    use crate::model::{ColorCurves, FilmParams};
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn profile(name: &str) -> FilmProfile {
        FilmProfile::new(name, ColorCurves::identity(), FilmParams::default())
    }

    /// Counts load executions and returns a fixed catalog.
    struct CountingLoader {
        calls: AtomicUsize,
        delay: Duration,
        fail_first: usize,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
                fail_first: 0,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogLoader for CountingLoader {
        fn load_catalog(&self) -> Result<Vec<FilmProfile>, LoadError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            if n < self.fail_first {
                let mut report = ValidationReport::default();
                report.push("Broken", vec![Violation::NonPositiveContrast(0.0)]);
                return Err(LoadError::Validation(report));
            }
            Ok(vec![
                profile("Kodak Portra 400"),
                profile("Fuji Velvia 50"),
                profile("Ilford HP5 Plus"),
            ])
        }
    }

    #[test]
    fn test_lazy_load_on_first_access() {
        let repo = ProfileRepository::new(CountingLoader::new());
        assert_eq!(repo.status(), LoadStatus::Unloaded);
        assert_eq!(repo.loader.calls(), 0);

        assert_eq!(repo.get_all_profiles().unwrap().len(), 3);
        assert_eq!(repo.get_all_profiles().unwrap().len(), 3);
        assert_eq!(repo.loader.calls(), 1);
        assert_eq!(repo.status(), LoadStatus::Loaded { profiles: 3 });
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let repo = ProfileRepository::new(CountingLoader {
            delay: Duration::from_millis(50),
            ..CountingLoader::new()
        });
        let callers = 8;
        let barrier = Barrier::new(callers);

        std::thread::scope(|s| {
            for _ in 0..callers {
                s.spawn(|| {
                    barrier.wait();
                    assert_eq!(repo.get_all_profiles().unwrap().len(), 3);
                });
            }
        });

        assert_eq!(repo.loader.calls(), 1);
    }

    #[test]
    fn test_get_profile_by_id() {
        let repo = ProfileRepository::new(CountingLoader::new());
        let p = repo.get_profile_by_id("fuji_velvia_50").unwrap();
        assert_eq!(p.name(), "Fuji Velvia 50");

        let err = repo.get_profile_by_id("agfa_vista").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { id } if id == "agfa_vista"));
        // Lookup failures leave the catalog intact.
        assert_eq!(repo.get_all_profiles().unwrap().len(), 3);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let repo = ProfileRepository::new(CountingLoader::new());
        let before = repo.get_all_profiles().unwrap();

        let on = repo.toggle_favorite("kodak_portra_400").unwrap();
        assert!(on.is_favorite());
        let favorites = repo.get_favorite_profiles().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id(), "kodak_portra_400");

        let off = repo.toggle_favorite("kodak_portra_400").unwrap();
        assert!(!off.is_favorite());
        assert!(repo.get_favorite_profiles().unwrap().is_empty());

        // Snapshots taken earlier are never mutated.
        assert!(before.iter().all(|p| !p.is_favorite()));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let repo = ProfileRepository::new(CountingLoader::new());
        assert!(matches!(
            repo.toggle_favorite("nope"),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(repo.get_favorite_profiles().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_toggles_on_different_ids() {
        let repo = ProfileRepository::new(CountingLoader::new());
        let barrier = Barrier::new(2);

        std::thread::scope(|s| {
            for id in ["kodak_portra_400", "ilford_hp5_plus"] {
                let (repo, barrier) = (&repo, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    assert!(repo.toggle_favorite(id).unwrap().is_favorite());
                });
            }
        });

        let ids: Vec<String> = repo
            .get_favorite_profiles()
            .unwrap()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["kodak_portra_400", "ilford_hp5_plus"]);
    }

    #[test]
    fn test_search() {
        let repo = ProfileRepository::new(CountingLoader::new());
        let hits = repo.search_profiles("portra").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Kodak Portra 400");

        assert_eq!(repo.search_profiles("FUJI").unwrap().len(), 1);
        assert!(repo.search_profiles("ektachrome").unwrap().is_empty());

        let all: Vec<String> = repo
            .search_profiles("  ")
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(all, vec!["Kodak Portra 400", "Fuji Velvia 50", "Ilford HP5 Plus"]);
        assert_eq!(repo.search_profiles("").unwrap().len(), 3);
    }

    #[test]
    fn test_failed_load_is_sticky_until_explicit_load() {
        let repo = ProfileRepository::new(CountingLoader {
            fail_first: 1,
            ..CountingLoader::new()
        });

        assert!(matches!(repo.get_all_profiles(), Err(RepositoryError::Load(_))));
        assert!(matches!(
            repo.get_profile_by_id("kodak_portra_400"),
            Err(RepositoryError::Load(_))
        ));
        assert_eq!(repo.status(), LoadStatus::LoadFailed);
        assert_eq!(repo.loader.calls(), 1);

        assert_eq!(repo.load().unwrap().len(), 3);
        assert_eq!(repo.loader.calls(), 2);
        assert!(repo.get_profile_by_id("kodak_portra_400").is_ok());
    }

    #[test]
    fn test_panicking_loader_does_not_wedge_state() {
        struct PanicOnce(AtomicUsize);

        impl CatalogLoader for PanicOnce {
            fn load_catalog(&self) -> Result<Vec<FilmProfile>, LoadError> {
                if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("loader exploded");
                }
                Ok(vec![profile("Kodak Gold 200")])
            }
        }

        let repo = ProfileRepository::new(PanicOnce(AtomicUsize::new(0)));
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            repo.get_all_profiles()
        }));
        assert!(caught.is_err());
        assert_eq!(repo.status(), LoadStatus::Unloaded);
        assert_eq!(repo.get_all_profiles().unwrap().len(), 1);
    }
}
