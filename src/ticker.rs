/// Registry of per-frame listeners, keyed by slide index.
///
/// Every attached listener runs once per frame until it is detached.
#[derive(Debug, Default)]
pub struct Ticker {
    listeners: Vec<usize>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, index: usize) {
        if !self.listeners.contains(&index) {
            log::trace!("ticker: attach slide {}", index);
            self.listeners.push(index);
        }
    }

    pub fn detach(&mut self, index: usize) {
        if let Some(pos) = self.listeners.iter().position(|&i| i == index) {
            log::trace!("ticker: detach slide {}", index);
            self.listeners.remove(pos);
        }
    }

    pub fn listeners(&self) -> &[usize] {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_idempotent() {
        let mut ticker = Ticker::new();
        ticker.attach(2);
        ticker.attach(2);
        assert_eq!(ticker.listeners(), &[2]);
    }

    #[test]
    fn detach_removes_only_that_listener() {
        let mut ticker = Ticker::new();
        ticker.attach(0);
        ticker.attach(1);
        ticker.detach(0);
        assert_eq!(ticker.listeners(), &[1]);
        ticker.detach(5);
        assert_eq!(ticker.listeners(), &[1]);
        ticker.detach(1);
        assert!(ticker.listeners().is_empty());
    }
}
