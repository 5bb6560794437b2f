//! Camera pose ownership and the resync dirty flag.
//!
//! Both the scroll timeline and the preview flight move the camera by writing
//! through [`CameraRig::apply`]. The 3D engine only sees the pose when the
//! per-frame hook drains the dirty flag with [`CameraRig::take_dirty`].

use glam::Vec3;

/// Eye position and look-at point of the active camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    #[inline]
    pub fn get(&self, field: PoseField) -> Vec3 {
        match field {
            PoseField::Position => self.position,
            PoseField::Target => self.target,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoseField {
    Position,
    Target,
}

/// Whether a write should request a camera resync on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirtyMark {
    Mark,
    Skip,
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    pose: CameraPose,
    dirty: bool,
}

impl CameraRig {
    /// Starts dirty so the first frame pushes the captured pose.
    pub fn new(pose: CameraPose) -> Self {
        Self { pose, dirty: true }
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Single mutation entry point. Returns whether the resync flag was raised.
    pub fn apply(&mut self, field: PoseField, value: Vec3, mark: DirtyMark) -> bool {
        match field {
            PoseField::Position => self.pose.position = value,
            PoseField::Target => self.pose.target = value,
        }
        if mark == DirtyMark::Mark {
            self.dirty = true;
        }
        self.dirty
    }

    pub fn set_pose(&mut self, pose: CameraPose, mark: DirtyMark) {
        self.apply(PoseField::Position, pose.position, mark);
        self.apply(PoseField::Target, pose.target, mark);
    }

    /// Take over a pose the engine already shows. Nothing is left to resync.
    pub fn adopt(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.dirty = false;
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read-and-clear, consumed once per frame.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rig_is_dirty_until_drained() {
        let mut rig = CameraRig::new(CameraPose::default());
        assert!(rig.take_dirty());
        assert!(!rig.take_dirty());
    }

    #[test]
    fn skip_mark_moves_pose_without_raising_flag() {
        let mut rig = CameraRig::new(CameraPose::default());
        rig.take_dirty();
        let raised = rig.apply(PoseField::Target, Vec3::ONE, DirtyMark::Skip);
        assert!(!raised);
        assert_eq!(rig.pose().target, Vec3::ONE);
        assert!(rig.apply(PoseField::Position, Vec3::X, DirtyMark::Mark));
    }

    #[test]
    fn adopted_pose_needs_no_resync() {
        let mut rig = CameraRig::new(CameraPose::default());
        let live = CameraPose::new(Vec3::splat(5.0), Vec3::Y);
        rig.adopt(live);
        assert_eq!(rig.pose(), live);
        assert!(!rig.take_dirty());
    }
}
