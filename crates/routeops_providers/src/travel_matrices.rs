use serde::Serialize;

use crate::provider_error::ProviderError;

pub type Meters = i64;
pub type Seconds = i64;

/// TravelMatrices holds the travel distance and time matrices.
/// Stored as flat vectors, `index = from * num_locations + to`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    distances: Vec<Meters>,
    times: Vec<Seconds>,
    num_locations: usize,
}

impl TravelMatrices {
    pub fn new(
        distances: Vec<Meters>,
        times: Vec<Seconds>,
        num_locations: usize,
    ) -> Result<Self, ProviderError> {
        let expected = num_locations * num_locations;
        for actual in [distances.len(), times.len()] {
            if actual != expected {
                return Err(ProviderError::Dimensions { expected, actual });
            }
        }

        Ok(TravelMatrices {
            distances,
            times,
            num_locations,
        })
    }

    /// Caller guarantees both vectors hold `num_locations * num_locations` values.
    pub(crate) fn square(distances: Vec<Meters>, times: Vec<Seconds>, num_locations: usize) -> Self {
        debug_assert_eq!(distances.len(), num_locations * num_locations);
        debug_assert_eq!(times.len(), num_locations * num_locations);

        TravelMatrices {
            distances,
            times,
            num_locations,
        }
    }

    /// Real valued matrices are truncated towards zero, `1999.9` meters becomes `1999`.
    pub fn from_real(
        distances: &[f64],
        times: &[f64],
        num_locations: usize,
    ) -> Result<Self, ProviderError> {
        TravelMatrices::new(
            distances.iter().map(|&value| value as Meters).collect(),
            times.iter().map(|&value| value as Seconds).collect(),
            num_locations,
        )
    }

    pub fn from_rows(
        distances: Vec<Vec<Meters>>,
        times: Vec<Vec<Seconds>>,
    ) -> Result<Self, ProviderError> {
        let num_locations = distances.len();

        TravelMatrices::new(
            distances.into_iter().flatten().collect(),
            times.into_iter().flatten().collect(),
            num_locations,
        )
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> Meters {
        self.distances[self.index(from, to)]
    }

    #[inline(always)]
    pub fn time(&self, from: usize, to: usize) -> Seconds {
        self.times[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn distance_rows(&self) -> Vec<Vec<Meters>> {
        self.distances
            .chunks(self.num_locations.max(1))
            .map(<[Meters]>::to_vec)
            .collect()
    }

    pub fn time_rows(&self) -> Vec<Vec<Seconds>> {
        self.times
            .chunks(self.num_locations.max(1))
            .map(<[Seconds]>::to_vec)
            .collect()
    }
}
