//! Breed suggestions service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::breed::sort_breed_names;
use crate::domain::ports::{BreedRepository, BreedRepositoryError, BreedsQuery};
use crate::domain::{Error, Species};

fn map_breed_repository_error(error: BreedRepositoryError) -> Error {
    match error {
        BreedRepositoryError::Connection { message } => {
            error!(%message, "breed repository unavailable");
            Error::service_unavailable("breed catalogue is temporarily unavailable")
        }
        BreedRepositoryError::Query { message } => {
            error!(%message, "breed repository query failed");
            Error::internal(format!("breed repository error: {message}"))
        }
    }
}

/// Breed suggestions implementing [`BreedsQuery`].
#[derive(Clone)]
pub struct BreedsService<B> {
    breeds: Arc<B>,
}

impl<B> BreedsService<B> {
    /// Create a new service over the breed repository.
    pub fn new(breeds: Arc<B>) -> Self {
        Self { breeds }
    }
}

#[async_trait]
impl<B> BreedsQuery for BreedsService<B>
where
    B: BreedRepository,
{
    async fn names(&self, species: Option<Species>) -> Result<Vec<String>, Error> {
        let breeds = self
            .breeds
            .list(species)
            .await
            .map_err(map_breed_repository_error)?;
        let mut names: Vec<String> = breeds
            .into_iter()
            .map(|breed| String::from(breed.name))
            .collect();
        sort_breed_names(&mut names);
        // Mixed breeds appear under both species when no filter is given.
        names.dedup();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockBreedRepository;
    use crate::domain::{Breed, ErrorCode, PetText};
    use rstest::rstest;

    fn breed(name: &str, species: Species) -> Breed {
        Breed::new(PetText::new(name).expect("breed name"), species)
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_sorted_and_deduplicated() {
        let mut repo = MockBreedRepository::new();
        repo.expect_list()
            .withf(|species| species.is_none())
            .return_once(|_| {
                Ok(vec![
                    breed("Siamês", Species::Cat),
                    breed("SRD", Species::Dog),
                    breed("Beagle", Species::Dog),
                    breed("SRD", Species::Cat),
                ])
            });

        let names = BreedsService::new(Arc::new(repo))
            .names(None)
            .await
            .expect("names");

        assert_eq!(names, ["Beagle", "Siamês", "SRD"]);
    }

    #[rstest]
    #[tokio::test]
    async fn species_filter_is_forwarded() {
        let mut repo = MockBreedRepository::new();
        repo.expect_list()
            .withf(|species| *species == Some(Species::Cat))
            .times(1)
            .return_once(|_| Ok(vec![breed("Persa", Species::Cat)]));

        let names = BreedsService::new(Arc::new(repo))
            .names(Some(Species::Cat))
            .await
            .expect("names");

        assert_eq!(names, ["Persa"]);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_is_service_unavailable() {
        let mut repo = MockBreedRepository::new();
        repo.expect_list()
            .return_once(|_| Err(BreedRepositoryError::connection("refused")));

        let error = BreedsService::new(Arc::new(repo))
            .names(None)
            .await
            .expect_err("unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
