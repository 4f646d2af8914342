//! Profile entity <-> model mapper

use vivah_core::{ContactDetails, DisplayInfo, Profile, ProfileBasics, UserId};

use crate::models::{DisplayInfoModel, ProfileModel};

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            user_id: UserId::new(model.user_id),
            basics: ProfileBasics {
                name: model.name,
                age: model.age,
                photos: model.photos,
                bio: model.bio,
                location: model.location,
                profession: model.profession,
            },
            contact: ContactDetails {
                phone: model.phone,
                email: model.email,
            },
        }
    }
}

impl From<DisplayInfoModel> for DisplayInfo {
    fn from(model: DisplayInfoModel) -> Self {
        DisplayInfo {
            user_id: UserId::new(model.user_id),
            name: Some(model.name),
            photo_url: model.photo_url,
            age: model.age,
            location: model.location,
            profession: model.profession,
        }
    }
}
