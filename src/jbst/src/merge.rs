//! Copy BSTN names onto a BST tree by position

use crate::bst::Bank;
use crate::bstn::NameBank;
use crate::{Error, Result};

/// Copy section, group and wave names from `names` into `bank`.
///
/// Both trees must have the same number of sections, groups per section and
/// waves per group. The shape is checked in full before anything is written,
/// so on error `bank` is left untouched.
pub fn merge_names(bank: &mut Bank, names: &NameBank) -> Result<()> {
    check_shape(bank, names)?;

    for (section, name_section) in bank.sections.iter_mut().zip(&names.sections) {
        section.name = name_section.name.clone();

        for (group, name_group) in section.groups.iter_mut().zip(&name_section.groups) {
            group.name = name_group.name.clone();

            for (wave, name) in group.waves.iter_mut().zip(&name_group.waves) {
                wave.name = name.clone();
            }
        }
    }

    tracing::debug!(waves = bank.wave_count(), "merged BSTN names");
    Ok(())
}

fn check_shape(bank: &Bank, names: &NameBank) -> Result<()> {
    check_len("sections", bank.sections.len(), names.sections.len())?;

    for (s, (section, name_section)) in bank.sections.iter().zip(&names.sections).enumerate() {
        check_len(
            &format!("section {}", s),
            section.groups.len(),
            name_section.groups.len(),
        )?;

        for (g, (group, name_group)) in section.groups.iter().zip(&name_section.groups).enumerate() {
            check_len(
                &format!("section {} group {}", s, g),
                group.waves.len(),
                name_group.waves.len(),
            )?;
        }
    }

    Ok(())
}

#[inline]
fn check_len(location: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::IndexOutOfRange {
            location: location.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl Bank {
    /// Consume the bank and return it with names merged in
    pub fn with_names(mut self, names: &NameBank) -> Result<Self> {
        merge_names(&mut self, names)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{self, Leaf};

    fn bank() -> Bank {
        Bank::parse(&fixture::bst(&[
            (
                None,
                vec![
                    (None, vec![Leaf::Wave(0x50, 1), Leaf::Plain(0x40)]),
                    (None, vec![Leaf::Plain(0x60)]),
                ],
            ),
            (None, vec![(None, vec![Leaf::Plain(0x40)])]),
        ]))
        .unwrap()
    }

    fn names(first_group: Vec<&'static str>) -> NameBank {
        NameBank::parse(&fixture::bstn(&[
            (
                Some("s0"),
                vec![(Some("g0"), first_group), (Some("g1"), vec!["c"])],
            ),
            (Some("s1"), vec![(Some("g2"), vec!["d"])]),
        ]))
        .unwrap()
    }

    #[test]
    fn test_merge_is_index_preserving() {
        let names = names(vec!["a", "b"]);
        let bank = bank().with_names(&names).unwrap();

        for ((s, g, w), wave) in bank.waves() {
            assert_eq!(Some(wave.name.as_str()), names.wave_name(s, g, w));
        }
        assert_eq!(bank.sections[0].name.as_deref(), Some("s0"));
        assert_eq!(bank.sections[1].name.as_deref(), Some("s1"));
        assert_eq!(bank.sections[0].groups[1].name.as_deref(), Some("g1"));
        assert_eq!(bank.sections[1].groups[0].name.as_deref(), Some("g2"));
        // structural data survives the merge
        assert_eq!(bank.wave(0, 0, 0).unwrap().sound_id(), Some(1));
    }

    #[test]
    fn test_fewer_names_fails_closed() {
        let mut bank = bank();
        let before = bank.clone();

        match merge_names(&mut bank, &names(vec!["a"])) {
            Err(Error::IndexOutOfRange {
                location,
                expected,
                actual,
            }) => {
                assert_eq!(location, "section 0 group 0");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected index out of range, got {:?}", other),
        }
        assert_eq!(bank, before);
    }

    #[test]
    fn test_extra_names_fail() {
        let mut bank = bank();
        assert!(matches!(
            merge_names(&mut bank, &names(vec!["a", "b", "extra"])),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_section_count_mismatch() {
        let mut bank = bank();
        let names = NameBank::parse(&fixture::bstn(&[(None, vec![])])).unwrap();

        match merge_names(&mut bank, &names) {
            Err(Error::IndexOutOfRange {
                location, actual, ..
            }) => {
                assert_eq!(location, "sections");
                assert_eq!(actual, 1);
            }
            other => panic!("expected index out of range, got {:?}", other),
        }
    }
}
