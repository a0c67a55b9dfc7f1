//! Human readable views of a run: the parameter table and a text schematic.

use crate::circuit::{CircuitConfig, SourceType};
use crate::solver::SimulationSummary;

/// Number of cells in the charge gauge.
const GAUGE_WIDTH: usize = 20;

/// Render the inputs and derived figures of a run as a two-column table.
pub fn parameter_table(config: &CircuitConfig, summary: &SimulationSummary) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Capacitance (µF)", format!("{:.2}", config.capacitance * 1e6)),
        ("Resistance (Ω)", format!("{:.2}", config.resistance)),
        ("Internal resistance (Ω)", format!("{:.2}", config.internal_resistance)),
        ("EMF (V)", format!("{:.2}", config.emf)),
        ("Source type", config.source_type.to_string()),
        ("Mode", config.mode.to_string()),
        ("Temp. coefficient (1/°C)", format!("{:.6}", config.temp_coefficient)),
        ("Temperature (°C)", format!("{:.2}", config.temperature)),
        ("Effective resistance (Ω)", format!("{:.2}", summary.effective_resistance)),
        ("Energy (J)", format!("{:.6}", summary.stored_energy)),
        ("Power loss (W)", format!("{:.6}", summary.power_loss)),
        ("Time constant (s)", format!("{:.6}", summary.time_constant)),
    ];

    if config.source_type == SourceType::Ac {
        rows.push((
            "Current phase lead (°)",
            format!("{:.2}", summary.current_phase_lead.to_degrees()),
        ));
    }

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once("Parameter".len()))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .chain(std::iter::once("Value".len()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<nw$}  {:>vw$}",
        "Parameter",
        "Value",
        nw = name_width,
        vw = value_width
    ));
    lines.push(format!("{}  {}", "-".repeat(name_width), "-".repeat(value_width)));
    for (name, value) in &rows {
        lines.push(format!(
            "{:<nw$}  {:>vw$}",
            name,
            value,
            nw = name_width,
            vw = value_width
        ));
    }
    lines.join("\n")
}

/// Draw the series loop with a gauge showing `charge_level` (0..=1).
///
/// ```text
/// +--[R_int 0.00 Ω]--[R 1000.00 Ω]--+
/// |                                 |
/// E 10.00 V DC             C 1.00 µF
/// |                                 |
/// +---------------------------------+
/// charge [##########----------]  50.0%
/// ```
pub fn diagram(config: &CircuitConfig, charge_level: f64) -> String {
    let top = format!(
        "+--[R_int {:.2} Ω]--[R {:.2} Ω]--+",
        config.internal_resistance, config.resistance
    );
    let width = top.chars().count();
    let inner = width.saturating_sub(2);

    let source = format!("E {:.2} V {}", config.emf, config.source_type);
    let capacitor = format!("C {:.2} µF", config.capacitance * 1e6);
    let gap = width
        .saturating_sub(source.chars().count() + capacitor.chars().count())
        .max(1);

    let level = if charge_level.is_nan() {
        0.0
    } else {
        charge_level.clamp(0.0, 1.0)
    };
    let filled = (level * GAUGE_WIDTH as f64).round() as usize;

    let wire = format!("|{}|", " ".repeat(inner));
    [
        top.clone(),
        wire.clone(),
        format!("{}{}{}", source, " ".repeat(gap), capacitor),
        wire,
        format!("+{}+", "-".repeat(inner)),
        format!(
            "charge [{}{}] {:>5.1}%",
            "#".repeat(filled),
            "-".repeat(GAUGE_WIDTH - filled),
            level * 100.0
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Mode;
    use crate::solver::Simulator;

    fn summary_for(config: &CircuitConfig) -> SimulationSummary {
        Simulator::new(config).unwrap().run().unwrap().summary
    }

    #[test]
    fn test_parameter_table_rows() {
        let config = CircuitConfig::new().with_temp_coefficient(0.0);
        let table = parameter_table(&config, &summary_for(&config));
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Parameter"));
        assert!(lines[0].ends_with("Value"));
        assert!(lines.iter().any(|l| l.starts_with("Capacitance (µF)") && l.ends_with("1.00")));
        assert!(lines.iter().any(|l| l.starts_with("Source type") && l.ends_with("DC")));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Time constant (s)") && l.ends_with("0.001000")));
        assert!(!table.contains("phase"));

        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn test_parameter_table_ac_phase() {
        let config = CircuitConfig::new().with_source_type(SourceType::Ac);
        let table = parameter_table(&config, &summary_for(&config));
        assert!(table.contains("Current phase lead (°)"));
    }

    #[test]
    fn test_diagram_gauge() {
        let config = CircuitConfig::new().with_mode(Mode::Discharging);
        let text = diagram(&config, 0.5);
        let last = text.lines().last().unwrap();
        assert_eq!(last, "charge [##########----------]  50.0%");
        assert!(text.contains("E 10.00 V DC"));
        assert!(text.contains("C 1.00 µF"));

        assert!(diagram(&config, 2.0).ends_with("[####################] 100.0%"));
        assert!(diagram(&config, f64::NAN).ends_with("[--------------------]   0.0%"));
    }

    #[test]
    fn test_diagram_frame_is_rectangular() {
        let text = diagram(&CircuitConfig::default(), 0.0);
        let lines: Vec<&str> = text.lines().collect();
        let width = lines[0].chars().count();
        for i in [1, 3, 4] {
            assert_eq!(lines[i].chars().count(), width);
        }
    }
}
