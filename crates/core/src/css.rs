//! Style strings shared by the components.

/// Overshooting "spring" curve used for entrances and hovers.
pub const SPRING: &str = "cubic-bezier(0.34, 1.56, 0.64, 1)";
/// Standard ease used when settling back.
pub const EASE: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

pub const RIPPLE_KEYFRAMES: &str = "
  @keyframes ripple {
    to {
      transform: scale(4);
      opacity: 0;
    }
  }
";

pub const TOAST_KEYFRAMES: &str = "
  @keyframes slideIn {
    from {
      transform: translateX(400px);
      opacity: 0;
    }
    to {
      transform: translateX(0);
      opacity: 1;
    }
  }
  @keyframes slideOut {
    from {
      transform: translateX(0);
      opacity: 1;
    }
    to {
      transform: translateX(400px);
      opacity: 0;
    }
  }
";

pub const FOCUS_RING: &str = "
  .keyboard-navigation *:focus {
    outline: 3px solid var(--color-accent);
    outline-offset: 4px;
  }
";

/// `all <secs>s <curve>`
pub fn transition_all(secs: f64, curve: &str) -> String {
    format!("all {}s {curve}", num(secs))
}

/// Format a number for CSS. Folds `-0` into `0`.
pub fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub fn px(value: f64) -> String {
    format!("{}px", num(value))
}

pub fn deg(value: f64) -> String {
    format!("{}deg", num(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_folded() {
        assert_eq!(px(-0.0), "0px");
        assert_eq!(px(-(0.0 * 0.5)), "0px");
        assert_eq!(deg(-12.5), "-12.5deg");
    }

    #[test]
    fn transition_formatting() {
        assert_eq!(transition_all(0.6, SPRING), "all 0.6s cubic-bezier(0.34, 1.56, 0.64, 1)");
        assert_eq!(transition_all(0.3, EASE), "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)");
    }
}
