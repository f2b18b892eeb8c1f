//! Pairwise compatibility rules.
//!
//! Each rule is a pure function of typed component records. Derived rules
//! take the bridging motherboard explicitly.

use crate::domain::{Cpu, Motherboard, Ram, Ssd};

/// Same memory type, and the module is no faster than the processor allows.
#[must_use]
pub fn cpu_ram(cpu: &Cpu, ram: &Ram) -> bool {
    cpu.memory_type.matches(&ram.memory_type) && ram.speed.fits_within(cpu.max_ram_speed)
}

/// Same socket, and the board's chipset is one the processor supports.
#[must_use]
pub fn cpu_motherboard(cpu: &Cpu, motherboard: &Motherboard) -> bool {
    cpu.socket.matches(&motherboard.socket)
        && cpu.supported_chipsets.contains(&motherboard.chipset)
}

/// Same memory type, and the module is no faster than the board allows.
#[must_use]
pub fn ram_motherboard(ram: &Ram, motherboard: &Motherboard) -> bool {
    ram.memory_type.matches(&motherboard.memory_type)
        && ram.speed.fits_within(motherboard.max_ram_speed)
}

/// The board supports both the drive's interface and its form factor.
#[must_use]
pub fn motherboard_ssd(motherboard: &Motherboard, ssd: &Ssd) -> bool {
    motherboard
        .supported_storage_interfaces
        .contains(&ssd.interface)
        && motherboard.supported_form_factors.contains(&ssd.form_factor)
}

/// A processor and a drive are compatible through a motherboard that accepts
/// both.
#[must_use]
pub fn cpu_ssd(cpu: &Cpu, motherboard: &Motherboard, ssd: &Ssd) -> bool {
    cpu_motherboard(cpu, motherboard) && motherboard_ssd(motherboard, ssd)
}

/// A memory module and a drive are compatible through a motherboard that
/// accepts both.
#[must_use]
pub fn ram_ssd(ram: &Ram, motherboard: &Motherboard, ssd: &Ssd) -> bool {
    ram_motherboard(ram, motherboard) && motherboard_ssd(motherboard, ssd)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{Component, ComponentRecord};

    fn cpu(socket: &str, memory: &str, max_speed: &str, chipsets: &str) -> Cpu {
        Cpu::from_record(
            &ComponentRecord::new()
                .with("socket", socket)
                .with("MemoryType", memory)
                .with("MaxRAMSpeed", max_speed)
                .with("SupportedChipsets", chipsets),
        )
    }

    fn ram(memory: &str, speed: &str) -> Ram {
        Ram::from_record(&ComponentRecord::new().with("type", memory).with("speed", speed))
    }

    fn board(socket: &str, chipset: &str, interfaces: &str, form_factors: &str) -> Motherboard {
        Motherboard::from_record(
            &ComponentRecord::new()
                .with("Socket", socket)
                .with("Chipset", chipset)
                .with("MemoryType", "DDR4")
                .with("MaxRAMSpeed", "DDR4-3200")
                .with("SupportedStorageInterfaces", interfaces)
                .with("SupportedFormFactors", form_factors),
        )
    }

    fn ssd(interface: &str, form_factor: &str) -> Ssd {
        Ssd::from_record(
            &ComponentRecord::new()
                .with("Interface", interface)
                .with("FormFactor", form_factor),
        )
    }

    #[test_case("DDR4", "DDR4-3200", true; "equal speed")]
    #[test_case("DDR4", "DDR4-2666", true; "slower module")]
    #[test_case("DDR4", "DDR4-3600", false; "faster module")]
    #[test_case("DDR5", "DDR5-3200", false; "different memory type")]
    #[test_case("", "DDR4-3200", false; "missing memory type")]
    #[test_case("DDR4", "", false; "missing speed")]
    fn cpu_ram_rule(memory: &str, speed: &str, expected: bool) {
        let cpu = cpu("AM4", "DDR4", "DDR4-3200", "B450");
        assert_eq!(cpu_ram(&cpu, &ram(memory, speed)), expected);
    }

    #[test]
    fn cpu_ram_with_prose_ceiling() {
        let cpu = cpu("AM4", "DDR4", "DDR4 up to 3600MHz", "B450");
        assert!(cpu_ram(&cpu, &ram("DDR4", "DDR4-3200MHz")));
    }

    #[test_case("AM4", "B450", true; "supported chipset")]
    #[test_case("AM4", "X570", true; "second chipset")]
    #[test_case("AM5", "B450", false; "socket mismatch")]
    #[test_case("AM4", "B550", false; "unsupported chipset")]
    #[test_case("AM4", "B45", false; "partial chipset name")]
    #[test_case("AM4", "", false; "missing chipset")]
    fn cpu_motherboard_rule(socket: &str, chipset: &str, expected: bool) {
        let cpu = cpu("AM4", "DDR4", "DDR4-3200", "B450,X570");
        let board = board(socket, chipset, "NVMe", "M.2");
        assert_eq!(cpu_motherboard(&cpu, &board), expected);
    }

    #[test]
    fn ram_motherboard_rule() {
        let board = board("AM4", "B450", "NVMe", "M.2");
        assert!(ram_motherboard(&ram("DDR4", "DDR4-3200"), &board));
        assert!(!ram_motherboard(&ram("DDR4", "DDR4-4000"), &board));
        assert!(!ram_motherboard(&ram("DDR5", "DDR5-3200"), &board));
    }

    #[test_case("NVMe", "M.2", true; "supported")]
    #[test_case("SATA", "M.2", true; "second interface")]
    #[test_case("PCIe", "M.2", false; "unsupported interface")]
    #[test_case("NVMe", "2.5\"", false; "unsupported form factor")]
    #[test_case("", "M.2", false; "missing interface")]
    fn motherboard_ssd_rule(interface: &str, form_factor: &str, expected: bool) {
        let board = board("AM4", "B450", "NVMe,SATA", "M.2");
        assert_eq!(motherboard_ssd(&board, &ssd(interface, form_factor)), expected);
    }

    #[test]
    fn cpu_ssd_requires_both_legs_through_the_bridge() {
        let cpu = cpu("AM4", "DDR4", "DDR4-3200", "X570");
        let board = board("AM4", "B450", "NVMe", "M.2");
        let drive = ssd("NVMe", "M.2");

        assert!(!cpu_motherboard(&cpu, &board));
        assert!(motherboard_ssd(&board, &drive));
        assert!(!cpu_ssd(&cpu, &board, &drive));
    }

    #[test]
    fn ram_ssd_depends_on_the_bridge() {
        let module = ram("DDR4", "DDR4-3200");
        let drive = ssd("NVMe", "M.2");
        let nvme_board = board("AM4", "B450", "NVMe", "M.2");
        let sata_board = board("AM4", "B450", "SATA", "M.2");

        assert!(ram_ssd(&module, &nvme_board, &drive));
        assert!(!ram_ssd(&module, &sata_board, &drive));
    }

    #[test]
    fn records_without_attributes_are_never_compatible() {
        let (c, r, m, s) = (Cpu::default(), Ram::default(), Motherboard::default(), Ssd::default());
        assert!(!cpu_ram(&c, &r));
        assert!(!cpu_motherboard(&c, &m));
        assert!(!ram_motherboard(&r, &m));
        assert!(!motherboard_ssd(&m, &s));
        assert!(!cpu_ssd(&c, &m, &s));
        assert!(!ram_ssd(&r, &m, &s));
    }
}
