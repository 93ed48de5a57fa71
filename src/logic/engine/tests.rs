//! Scenario tests: signals → derive → classify with a real linear model

#[cfg(test)]
mod scenario_tests {
    use crate::logic::engine::{classify, ActivityState, EngineConfig};
    use crate::logic::engine::classify::classify_with_config;
    use crate::logic::features::{derive, FeatureVector, SignalVector, FEATURE_COUNT};
    use crate::logic::model::{Classifier, LinearClassifier};

    /// Model that leans INACTIVE unless synapse ratio is high
    fn model() -> LinearClassifier {
        let mut weights = [0.0; FEATURE_COUNT];
        weights[13] = 0.5; // syn_ratio
        weights[11] = 1.0; // Membrane
        LinearClassifier::new(weights, -3.0)
    }

    /// Scenario A: every channel saturated forces ACTIVE
    #[test]
    fn scenario_a_saturated_channels_override() {
        let signals = SignalVector::new([
            1.0, 1.0, 1.0, 1.0,
            0.95, 0.1, 0.1,
            0.9, 0.6, 0.9, 0.3, 0.75,
        ]).unwrap();
        let derived = derive(&signals);
        assert_eq!(derived.total_power, 4.0);

        let model = model();
        let verdict = classify(&signals, &derived, Some(&model)).unwrap();
        assert_eq!(verdict.state, ActivityState::Active);
        assert_eq!(verdict.confidence, 0.99);
        assert!(verdict.overridden);
    }

    /// Scenario B: all zero except Alpha, classifier output returned verbatim
    #[test]
    fn scenario_b_quiet_signals_use_model() {
        let signals = SignalVector::new([
            0.0, 0.0, 0.0, 0.0,
            0.5, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ]).unwrap();
        let derived = derive(&signals);
        assert_eq!(derived.total_power, 0.0);

        let model = model();
        let features = FeatureVector::assemble(&signals, &derived);
        let expected_state = model.predict(&features).unwrap();
        let expected_probs = model.predict_probability(&features).unwrap();

        let verdict = classify(&signals, &derived, Some(&model)).unwrap();
        assert!(!verdict.overridden);
        assert_eq!(verdict.state, expected_state);
        assert_eq!(verdict.confidence, expected_probs.for_state(expected_state));
    }

    /// The reference slider defaults sum to 3.4 and stay with the model
    #[test]
    fn reference_defaults_are_not_forced() {
        let signals = SignalVector::reference_defaults();
        let derived = derive(&signals);

        let verdict = classify(&signals, &derived, Some(&model())).unwrap();
        assert!(!verdict.overridden);
    }

    /// Raising one channel pushes the defaults over the threshold
    #[test]
    fn raising_a_channel_crosses_threshold() {
        let signals = SignalVector::reference_defaults().with_signal("TP10", 0.95).unwrap();
        let derived = derive(&signals);
        assert!(derived.total_power >= 3.5);

        let verdict = classify_with_config(&signals, &derived, Some(&model()), &EngineConfig::default()).unwrap();
        assert!(verdict.overridden);
    }
}
