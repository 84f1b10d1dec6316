//! User-friendly message formatting helpers

/// Print success message with next steps
pub fn print_success(message: &str, next_steps: &[&str]) {
    println!("✓ {message}");
    if !next_steps.is_empty() {
        println!("\nNext steps:");
        for step in next_steps {
            println!("  {step}");
        }
    }
}

/// Print error message with suggestions
pub fn print_error(message: &str, suggestions: &[&str]) {
    eprintln!("✗ {message}");
    if !suggestions.is_empty() {
        eprintln!();
        for suggestion in suggestions {
            eprintln!("  {suggestion}");
        }
    }
}

/// Raw register value as zero-padded hex of `width` bits.
pub fn format_register(raw: i32, width: u8) -> String {
    let digits = usize::from(width.div_ceil(4));
    let mask = if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    };
    format!("0x{:0digits$x}", raw as u32 & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_register() {
        assert_eq!(format_register(-1, 16), "0xffff");
        assert_eq!(format_register(0x12, 16), "0x0012");
        assert_eq!(format_register(-2, 24), "0xfffffe");
    }
}
