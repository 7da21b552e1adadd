//! Activation function types.

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activator {
    /// Logistic sigmoid, `1 / (1 + e^-x)`
    Sigmoid,
    /// Identity function, passes the weighted sum through unchanged
    Identity,
}

impl Default for Activator {
    fn default() -> Self {
        Activator::Sigmoid
    }
}

impl Activator {
    /// Evaluates `f(x)` for the selected activation function.
    pub fn f(self, x: f64) -> f64 {
        match self {
            Activator::Sigmoid => sigmoid(x),
            Activator::Identity => x,
        }
    }

    /// Evaluates the derivative `f'(x)`.
    ///
    /// Unlike the usual output-based shortcut, this takes the *raw* weighted
    /// sum, so no inverse of the activation is ever needed.
    pub fn fprime(self, x: f64) -> f64 {
        match self {
            Activator::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activator::Identity => 1.0,
        }
    }
}

/// Logistic sigmoid in a form that never overflows `exp`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_values() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.9999);
        assert!(sigmoid(-10.0) < 0.0001);
        assert!((sigmoid(1.0) - 0.731_058_578_630_004_9).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_finite_at_extremes() {
        assert_eq!(sigmoid(1e6), 1.0);
        assert_eq!(sigmoid(-1e6), 0.0);
        assert_eq!(Activator::Sigmoid.fprime(1e6), 0.0);
        assert_eq!(Activator::Sigmoid.fprime(-1e6), 0.0);
    }

    #[test]
    fn sigmoid_derivative_matches_finite_difference() {
        let h = 1e-6;
        for &x in &[-3.0, -0.5, 0.0, 0.7, 2.5] {
            let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert!((Activator::Sigmoid.fprime(x) - numeric).abs() < 1e-8);
        }
        assert_eq!(Activator::Sigmoid.fprime(0.0), 0.25);
    }

    #[test]
    fn identity_passes_through() {
        assert_eq!(Activator::Identity.f(-2.5), -2.5);
        assert_eq!(Activator::Identity.fprime(-2.5), 1.0);
    }

    #[test]
    fn activator_names_in_json() {
        let json = serde_json::to_string(&Activator::Sigmoid).unwrap();
        assert_eq!(json, "\"sigmoid\"");
        let back: Activator = serde_json::from_str("\"identity\"").unwrap();
        assert_eq!(back, Activator::Identity);
    }
}
