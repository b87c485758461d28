pub mod cubesim_vis3d;
