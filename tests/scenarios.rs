//! End-to-end selection and mating scenarios.

use u_moea::coupler::{
    offspring_couple_count, Coupler, DefaultCoupler, EpsilonNeighborhoodCoupler,
    NeighborhoodCouplerConfig,
};
use u_moea::density::{Crowding, FrontDensityIndicator};
use u_moea::epsilon::{EpsilonAdaptation, EpsilonConfig};
use u_moea::model::{BasicIndividual, Individual, Objective, Objectives};
use u_moea::random::create_rng;
use u_moea::selector::{
    EpsilonSamplingSelector, Nsga2, Nsga2Config, Selector, SelectorKind, Spea2, Spea2Config,
};
use u_moea::sorting::NonDominatedFronts;

fn ind(id: u64, a: f64, b: f64) -> BasicIndividual {
    let mut o = Objectives::new();
    o.add(Objective::minimize("a"), a);
    o.add(Objective::minimize("b"), b);
    BasicIndividual::new(id, o)
}

fn ids<I: Individual>(v: &[&I]) -> Vec<u64> {
    v.iter().map(|i| i.id().0).collect()
}

#[test]
fn test_four_point_fronts_and_crowding() {
    let pop = vec![
        ind(0, 1.0, 4.0), // A
        ind(1, 2.0, 3.0), // B
        ind(2, 3.0, 2.0), // C
        ind(3, 5.0, 5.0), // D
    ];
    let refs: Vec<&BasicIndividual> = pop.iter().collect();
    let fronts = NonDominatedFronts::new(&refs);

    assert_eq!(fronts.front_count(), 2);
    assert_eq!(ids(fronts.front(0)), vec![0, 1, 2]);
    assert_eq!(ids(fronts.front(1)), vec![3]);

    let density = Crowding.density_values(fronts.front(0));
    assert!(density[0].is_infinite());
    assert!(density[1].is_finite() && density[1] > 0.0);
    assert!(density[2].is_infinite());
}

#[test]
fn test_epsilon_adaptation_sequence() {
    let mut adaptation =
        EpsilonAdaptation::new(&EpsilonConfig::default(), &EpsilonConfig::default()).unwrap();

    adaptation.adapt_sampling_epsilon(true);
    assert!((adaptation.sampling_epsilon() - 0.005).abs() < 1e-15);
    assert!((adaptation.sampling().delta() - 0.005).abs() < 1e-15);

    adaptation.adapt_sampling_epsilon(false);
    assert_eq!(adaptation.sampling_epsilon(), 0.0);
    assert!((adaptation.sampling().delta() - 0.0025).abs() < 1e-15);

    // neighborhood loop untouched
    assert_eq!(adaptation.neighborhood_epsilon(), 0.0);
}

#[test]
fn test_default_coupler_order() {
    let pop: Vec<BasicIndividual> = (0..4).map(|i| ind(i, i as f64, 0.0)).collect();
    let refs: Vec<&BasicIndividual> = pop.iter().collect();
    let couples = DefaultCoupler
        .get_couples(2, &refs, &mut create_rng(0))
        .unwrap();
    let pairs: Vec<(u64, u64)> = couples
        .iter()
        .map(|c| (c.first.id.0, c.second.id.0))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (2, 3)]);
}

/// A few generations of select, couple and discard with a toy variation
/// operator (averaging the couple), as a caller's loop would do.
fn run_generations(mut selector: SelectorKind, seed: u64) -> Vec<BasicIndividual> {
    let mut rng = create_rng(seed);
    let mut next_id = 0u64;
    let mut population: Vec<BasicIndividual> = (0..20)
        .map(|i| {
            next_id += 1;
            let x = i as f64 / 19.0;
            ind(next_id, x + 0.5, 1.5 - x + (i % 4) as f64 * 0.1)
        })
        .collect();
    selector.init(40);
    let mut coupler = EpsilonNeighborhoodCoupler::new(
        &NeighborhoodCouplerConfig::default().with_planned_neighborhoods(4),
    )
    .unwrap();

    for _ in 0..5 {
        let offspring: Vec<BasicIndividual> = {
            let refs: Vec<&BasicIndividual> = population.iter().collect();
            let parents = selector.get_parents(10, &refs, &mut rng);
            let couples = coupler
                .get_couples(offspring_couple_count(10), &parents, &mut rng)
                .unwrap();
            couples
                .iter()
                .flat_map(|c| {
                    let a = c.first.objectives.array();
                    let b = c.second.objectives.array();
                    [0.45, 0.55].map(|w| (w * a[0] + (1.0 - w) * b[0], 0.95 * (w * a[1] + (1.0 - w) * b[1])))
                })
                .map(|(a, b)| {
                    next_id += 1;
                    ind(next_id, a, b)
                })
                .collect()
        };
        population.extend(offspring);

        let lames: Vec<u64> = {
            let refs: Vec<&BasicIndividual> = population.iter().collect();
            let lames = selector.get_lames(10, &refs, &mut rng).unwrap();
            ids(&lames)
        };
        population.retain(|i| !lames.contains(&i.id.0));
        assert_eq!(population.len(), 20);
    }
    population
}

#[test]
fn test_generational_loop_keeps_population_size() {
    let selectors = vec![
        SelectorKind::from(Nsga2::new(Nsga2Config::default().with_tournament(2))),
        SelectorKind::from(Spea2::new(Spea2Config::default().with_tournament(2))),
        SelectorKind::from(EpsilonSamplingSelector::new(&EpsilonConfig::default()).unwrap()),
    ];
    for selector in selectors {
        let survivors = run_generations(selector, 11);
        assert_eq!(survivors.len(), 20);
    }
}
