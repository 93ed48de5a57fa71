//! Classification Engine
//!
//! Input: SignalVector, DerivedFeatures, optional Classifier
//! Output: Verdict
//!
//! Stateless: identical inputs and the same classifier give identical verdicts.

use super::rules::EngineConfig;
use super::types::Verdict;
use crate::logic::error::{EngineError, EngineResult};
use crate::logic::features::{DerivedFeatures, FeatureVector, SignalVector};
use crate::logic::model::{ActivityState, Classifier, ClassifierError};

/// Classify with the default rules
pub fn classify(
    signals: &SignalVector,
    derived: &DerivedFeatures,
    classifier: Option<&dyn Classifier>,
) -> EngineResult<Verdict> {
    classify_with_config(signals, derived, classifier, &EngineConfig::default())
}

/// Classify with custom rules
pub fn classify_with_config(
    signals: &SignalVector,
    derived: &DerivedFeatures,
    classifier: Option<&dyn Classifier>,
    config: &EngineConfig,
) -> EngineResult<Verdict> {
    config.validate()?;

    if classifier.is_none() && config.override_requires_classifier {
        return Err(EngineError::ClassifierUnavailable);
    }

    let features = FeatureVector::assemble(signals, derived);

    // ⚠️ OVERRIDE RULE: extreme total power bypasses the model entirely,
    // whatever the other signals say and whether or not a model is loaded.
    if config.is_forced(derived.total_power) {
        log::warn!(
            "System threshold overridden: extreme computational load detected (total_power={:.2} >= {:.2})",
            derived.total_power,
            config.force_power_threshold
        );
        return Ok(Verdict {
            state: ActivityState::Active,
            confidence: config.override_confidence,
            overridden: true,
        });
    }

    let classifier = classifier.ok_or(EngineError::ClassifierUnavailable)?;

    let state = classifier.predict(&features)?;
    let probabilities = classifier.predict_probability(&features)?;

    // Confidence is the mass on the predicted label, not the max over labels
    let confidence = probabilities.for_state(state);
    if !(0.0..=1.0).contains(&confidence) {
        return Err(EngineError::Inference(ClassifierError(format!(
            "{} returned probability {} for {}",
            classifier.name(),
            confidence,
            state
        ))));
    }

    log::debug!(
        "{} predicted {} (p={:.4}, total_power={:.2}, syn_ratio={:.2})",
        classifier.name(),
        state,
        confidence,
        derived.total_power,
        derived.syn_ratio
    );

    Ok(Verdict {
        state,
        confidence,
        overridden: false,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{derive, SIGNAL_COUNT};
    use crate::logic::model::ClassProbabilities;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed answer, counts calls and keeps every vector it is given
    struct StubClassifier {
        state: ActivityState,
        probabilities: ClassProbabilities,
        calls: AtomicUsize,
        seen: Mutex<Vec<FeatureVector>>,
    }

    impl StubClassifier {
        fn new(state: ActivityState, inactive: f64, active: f64) -> Self {
            Self {
                state,
                probabilities: ClassProbabilities::new(inactive, active),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Classifier for StubClassifier {
        fn predict(&self, features: &FeatureVector) -> Result<ActivityState, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(features.clone());
            Ok(self.state)
        }

        fn predict_probability(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(features.clone());
            Ok(self.probabilities)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _: &FeatureVector) -> Result<ActivityState, ClassifierError> {
            Err(ClassifierError("session crashed".to_string()))
        }

        fn predict_probability(&self, _: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
            Err(ClassifierError("session crashed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn signals_with_channels(af7: f64, tp9: f64, af8: f64, tp10: f64) -> SignalVector {
        let mut values = [0.5; SIGNAL_COUNT];
        values[..4].copy_from_slice(&[af7, tp9, af8, tp10]);
        SignalVector::new(values).unwrap()
    }

    #[test]
    fn test_override_ignores_inactive_classifier() {
        let stub = StubClassifier::new(ActivityState::Inactive, 0.95, 0.05);
        let signals = signals_with_channels(1.0, 1.0, 0.9, 0.9);
        let derived = derive(&signals);
        assert!(derived.total_power >= 3.5);

        let verdict = classify(&signals, &derived, Some(&stub)).unwrap();
        assert_eq!(verdict.state, ActivityState::Active);
        assert_eq!(verdict.confidence, 0.99);
        assert!(verdict.overridden);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0, "classifier must be bypassed");
    }

    #[test]
    fn test_boundary_equality_triggers_override() {
        let stub = StubClassifier::new(ActivityState::Inactive, 0.9, 0.1);
        // 0.875 is exact in binary, so the sum is exactly 3.5
        let signals = signals_with_channels(0.875, 0.875, 0.875, 0.875);
        let derived = derive(&signals);
        assert_eq!(derived.total_power, 3.5);

        let verdict = classify(&signals, &derived, Some(&stub)).unwrap();
        assert!(verdict.overridden);
        assert_eq!(verdict.state, ActivityState::Active);
    }

    #[test]
    fn test_below_threshold_uses_classifier_verbatim() {
        let stub = StubClassifier::new(ActivityState::Inactive, 0.83, 0.17);
        let signals = SignalVector::reference_defaults();
        let derived = derive(&signals);
        assert!(derived.total_power < 3.5);

        let verdict = classify(&signals, &derived, Some(&stub)).unwrap();
        assert_eq!(verdict.state, ActivityState::Inactive);
        assert_eq!(verdict.confidence, 0.83);
        assert!(!verdict.overridden);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_classifier_receives_assembled_vector() {
        let stub = StubClassifier::new(ActivityState::Active, 0.2, 0.8);
        let signals = SignalVector::new([
            0.1, 0.2, 0.3, 0.4,
            0.6, 0.3, 0.2,
            0.7, 0.8, 0.05, 0.15, 0.9,
        ]).unwrap();
        let derived = derive(&signals);

        classify(&signals, &derived, Some(&stub)).unwrap();

        let expected = FeatureVector::assemble(&signals, &derived);
        let seen = stub.seen.lock();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|features| *features == expected));
        assert_eq!(seen[0].get_by_name("total_power"), Some(derived.total_power));
        assert_eq!(seen[0].get_by_name("syn_ratio"), Some(derived.syn_ratio));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let stub = StubClassifier::new(ActivityState::Inactive, 0.9, 0.1);
        let signals = signals_with_channels(1.0, 1.0, 1.0, 1.0);
        let derived = derive(&signals);

        let config = EngineConfig { override_confidence: 1.5, ..EngineConfig::default() };
        assert!(matches!(
            classify_with_config(&signals, &derived, Some(&stub), &config),
            Err(EngineError::InvalidConfig { field: "override_confidence", .. })
        ));

        let config = EngineConfig::with_threshold(f64::NAN);
        assert!(matches!(
            classify_with_config(&signals, &derived, Some(&stub), &config),
            Err(EngineError::InvalidConfig { field: "force_power_threshold", .. })
        ));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_confidence_is_predicted_class_not_max() {
        // Predicts ACTIVE while giving ACTIVE the lower probability
        let stub = StubClassifier::new(ActivityState::Active, 0.7, 0.3);
        let signals = signals_with_channels(0.2, 0.2, 0.2, 0.2);
        let derived = derive(&signals);

        let verdict = classify(&signals, &derived, Some(&stub)).unwrap();
        assert_eq!(verdict.state, ActivityState::Active);
        assert_eq!(verdict.confidence, 0.3);
    }

    #[test]
    fn test_idempotent() {
        let stub = StubClassifier::new(ActivityState::Active, 0.4, 0.6);
        let signals = signals_with_channels(0.3, 0.3, 0.3, 0.3);
        let derived = derive(&signals);

        let first = classify(&signals, &derived, Some(&stub)).unwrap();
        let second = classify(&signals, &derived, Some(&stub)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_classifier_below_threshold() {
        let signals = SignalVector::reference_defaults();
        let derived = derive(&signals);

        let err = classify(&signals, &derived, None).unwrap_err();
        assert!(matches!(err, EngineError::ClassifierUnavailable));
    }

    #[test]
    fn test_missing_classifier_override_still_applies() {
        let signals = signals_with_channels(1.0, 1.0, 1.0, 1.0);
        let derived = derive(&signals);

        let verdict = classify(&signals, &derived, None).unwrap();
        assert!(verdict.overridden);

        let strict = EngineConfig::strict();
        let err = classify_with_config(&signals, &derived, None, &strict).unwrap_err();
        assert!(matches!(err, EngineError::ClassifierUnavailable));
    }

    #[test]
    fn test_custom_threshold() {
        let stub = StubClassifier::new(ActivityState::Inactive, 0.6, 0.4);
        let signals = signals_with_channels(0.5, 0.5, 0.5, 0.5);
        let derived = derive(&signals);

        let low = EngineConfig::with_threshold(2.0);
        assert!(classify_with_config(&signals, &derived, Some(&stub), &low).unwrap().overridden);

        let off = EngineConfig::override_disabled();
        let all_ones = signals_with_channels(1.0, 1.0, 1.0, 1.0);
        let verdict = classify_with_config(&all_ones, &derive(&all_ones), Some(&stub), &off).unwrap();
        assert!(!verdict.overridden);
        assert_eq!(verdict.state, ActivityState::Inactive);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let signals = SignalVector::reference_defaults();
        let derived = derive(&signals);

        let err = classify(&signals, &derived, Some(&FailingClassifier)).unwrap_err();
        assert!(matches!(err, EngineError::Inference(_)));
        assert!(err.to_string().contains("session crashed"));
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let stub = StubClassifier::new(ActivityState::Active, -0.5, 1.5);
        let signals = SignalVector::reference_defaults();
        let derived = derive(&signals);

        assert!(matches!(
            classify(&signals, &derived, Some(&stub)),
            Err(EngineError::Inference(_))
        ));
    }
}
