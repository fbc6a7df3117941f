//! Ordered fallback chains over telemetry providers.
//!
//! Each [`Probe`] wraps one way of reading a value (a vendor CLI, a sysfs
//! counter, a sensor). A [`ProbeChain`] asks them in order and stops at the
//! first one that produces a value.

use tracing::trace;

/// One source for a reading of type `T`.
pub trait Probe<T> {
    /// Short name used in logs and `pwrwatch detect` output.
    fn name(&self) -> &'static str;

    /// Returns `None` when the source is unavailable or the read failed.
    fn read(&mut self) -> Option<T>;
}

/// Tries probes in insertion order; the first defined reading wins.
pub struct ProbeChain<T> {
    probes: Vec<Box<dyn Probe<T> + Send>>,
}

impl<T> Default for ProbeChain<T> {
    fn default() -> Self {
        Self { probes: Vec::new() }
    }
}

impl<T> ProbeChain<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, probe: impl Probe<T> + Send + 'static) -> Self {
        self.probes.push(Box::new(probe));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Value from the first probe that answers, with that probe's name.
    pub fn read_with_source(&mut self) -> Option<(&'static str, T)> {
        for probe in &mut self.probes {
            match probe.read() {
                Some(value) => return Some((probe.name(), value)),
                None => trace!(probe = probe.name(), "Probe returned no value, falling back"),
            }
        }
        None
    }

    pub fn read(&mut self) -> Option<T> {
        self.read_with_source().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        name: &'static str,
        value: Option<f32>,
        calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Probe<f32> for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn read(&mut self) -> Option<f32> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.value
        }
    }

    fn fixed(
        name: &'static str,
        value: Option<f32>,
    ) -> (Fixed, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        (
            Fixed {
                name,
                value,
                calls: calls.clone(),
            },
            calls,
        )
    }

    #[test]
    fn test_first_defined_value_wins() {
        let (a, _) = fixed("vendor", None);
        let (b, _) = fixed("counter", Some(0.4));
        let (c, c_calls) = fixed("sensor", Some(0.9));
        let mut chain = ProbeChain::new().with(a).with(b).with(c);

        assert_eq!(chain.read_with_source(), Some(("counter", 0.4)));
        assert_eq!(c_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_is_a_defined_value() {
        let (a, _) = fixed("vendor", Some(0.0));
        let (b, b_calls) = fixed("counter", Some(0.7));
        let mut chain = ProbeChain::new().with(a).with(b);

        assert_eq!(chain.read(), Some(0.0));
        assert_eq!(b_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_exhausted_chain_returns_none() {
        let (a, _) = fixed("vendor", None);
        let mut chain = ProbeChain::new().with(a);
        assert_eq!(chain.read(), None);

        let mut empty: ProbeChain<f32> = ProbeChain::new();
        assert!(empty.is_empty());
        assert_eq!(empty.read(), None);
    }

    #[test]
    fn test_names_preserve_order() {
        let (a, _) = fixed("vendor", None);
        let (b, _) = fixed("counter", None);
        let chain = ProbeChain::new().with(a).with(b);
        assert_eq!(chain.names(), vec!["vendor", "counter"]);
    }
}
