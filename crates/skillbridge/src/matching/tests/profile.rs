use super::common::*;
use crate::matching::domain::{Importance, LevelScale};
use crate::matching::profile::{ProfileBuilder, ProfileError, ProfileSource};
use crate::matching::vocabulary::CompetencyId;

#[test]
fn builds_need_profile_with_importance() {
    let vocabulary = vocabulary();
    let builder = ProfileBuilder::new(&vocabulary, LevelScale::default());

    let profile = welding_role()
        .compute_profile(&builder)
        .expect("role profile builds");

    assert_eq!(profile.len(), 2);
    let welding = profile
        .get(&CompetencyId::from("welding"))
        .expect("welding entry");
    assert_eq!(welding.level, 3);
    assert_eq!(welding.importance, Some(Importance::Required));
    assert_eq!(
        profile
            .get(&CompetencyId::from("safety"))
            .and_then(|entry| entry.importance),
        Some(Importance::Preferred)
    );
}

#[test]
fn have_profile_carries_no_importance() {
    let vocabulary = vocabulary();
    let builder = ProfileBuilder::new(&vocabulary, LevelScale::default());

    let profile = builder
        .for_student(&welding_students()[0])
        .expect("student profile builds");

    assert!(profile.iter().all(|(_, entry)| entry.importance.is_none()));
    assert_eq!(profile.level_of(&CompetencyId::from("safety")), Some(2));
}

#[test]
fn rejects_unknown_competency() {
    let vocabulary = vocabulary();
    let builder = ProfileBuilder::new(&vocabulary, LevelScale::default());
    let candidate = student("s-x", vec![skill("welding", 2), skill("unknown-x", 2)]);

    match builder.for_student(&candidate) {
        Err(ProfileError::InvalidCompetencyReference { competency_id }) => {
            assert_eq!(competency_id, CompetencyId::from("unknown-x"))
        }
        other => panic!("expected invalid reference, got {other:?}"),
    }
}

#[test]
fn rejects_levels_outside_the_scale() {
    let vocabulary = vocabulary();
    let scale = LevelScale::new(1, 5).expect("valid scale");
    let builder = ProfileBuilder::new(&vocabulary, scale);

    match builder.need_profile(&[required("welding", 6)]) {
        Err(ProfileError::InvalidLevelRange {
            level, min, max, ..
        }) => {
            assert_eq!((level, min, max), (6, 1, 5));
        }
        other => panic!("expected level range error, got {other:?}"),
    }

    assert!(matches!(
        builder.have_profile(&[skill("welding", 0)]),
        Err(ProfileError::InvalidLevelRange { level: 0, .. })
    ));
}

#[test]
fn rejects_duplicate_competencies() {
    let vocabulary = vocabulary();
    let builder = ProfileBuilder::new(&vocabulary, LevelScale::default());
    let duplicated = role(
        "role-dup",
        vec![required("welding", 3), preferred("welding", 2)],
    );

    match builder.for_role(&duplicated) {
        Err(ProfileError::DuplicateCompetency { competency_id }) => {
            assert_eq!(competency_id.as_str(), "welding")
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[test]
fn empty_requirement_set_builds_empty_profile() {
    let vocabulary = vocabulary();
    let builder = ProfileBuilder::new(&vocabulary, LevelScale::default());

    let profile = builder
        .for_curriculum(&curriculum("cur-empty", Vec::new()))
        .expect("empty profile builds");

    assert!(profile.is_empty());
}
