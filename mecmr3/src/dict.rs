//! Tag dictionary: a static, sorted table of `(group, key, type, name)`
//! observed in the wild, used to validate every item and to label
//! PHI-bearing keys for the printer.
//!
//! Entries are sorted lexicographically by `(group, key)` with `key`
//! unique within a group, in the shape of `hfsplus::unicode::CASE_FOLD` —
//! a plain `static` slice rather than a build-time codegen step (see
//! DESIGN.md for why this workspace favors a reviewable static table
//! over a `build.rs` generator here).

use crate::error::{MecMr3Error, Result};

/// `(group, key, type, name)`, sorted by `(group, key)`.
pub(crate) static DICTIONARY: &[(u8, u32, u32, &str)] = &[
    (1, 0x00001, 0x001B5F00, "usan_triplet_block"),
    (1, 0x00002, 0x00000200, "shim_table_entry"),
    (1, 0x00003, 0xFF003100, "acquisition_matrix_pair"),
    (1, 0x00004, 0xFFF00200, "reserved_int32_block"),
    (1, 0x00005, 0x001F4000, "sequence_name_table"),
    (1, 0x00006, 0x00000500, "pixel_spacing_mm"),
    (1, 0x00007, 0x00000400, "navigator_sample"),
    (1, 0x00008, 0x00000600, "slice_normal_vector"),
    (1, 0x00009, 0x000BBA00, "window_center_width_pair"),
    (1, 0x0000A, 0x00000400, "navigator_sample"),
    (1, 0x0000B, 0x00177000, "fat_sat_flags"),
    (1, 0x0000C, 0xFF002C00, "coil_name_sjis"),
    (1, 0x0000D, 0x000BBB00, "saturation_band_bytes"),
    (1, 0x0000E, 0x00000E00, "study_datetime"),
    (1, 0x0000F, 0x00000E00, "acquisition_datetime"),
    (1, 0x00010, 0xFF002100, "gradient_delay_table"),
    (1, 0x00011, 0x001F4100, "series_instance_uid_pair"),
    (1, 0x00012, 0x001B5F00, "usan_triplet_block"),
    (1, 0x00013, 0xFF002100, "gradient_delay_table"),
    (1, 0x00014, 0xFF002500, "device_serial_table"),
    (1, 0x00015, 0x00000E00, "study_datetime"),
    (1, 0x00016, 0x00000500, "pixel_spacing_mm"),
    (1, 0x00017, 0x0007D000, "raw_kspace_offsets"),
    (1, 0x00018, 0x000BC100, "channel_labels"),
    (1, 0x00019, 0x001F4300, "implementation_version_block"),
    (1, 0x0001A, 0xFFF00200, "reserved_int32_block"),
    (1, 0x0001B, 0x00177000, "fat_sat_flags"),
    (1, 0x0001C, 0x000BC100, "surface_coil_labels"),
    (1, 0x0001D, 0xFF002100, "gradient_delay_table"),
    (1, 0x0001E, 0xFF002500, "device_serial_table"),
    (1, 0x0001F, 0x00177000, "fat_sat_flags"),
    (1, 0x00020, 0xFFF00200, "reserved_int32_block"),
    (1, 0x00021, 0x0007D000, "raw_kspace_offsets"),
    (1, 0x00022, 0x00177000, "fat_sat_flags"),
    (1, 0x013EC, 0xFF002900, "imaging_frequency_mhz"),
    (1, 0x017F2, 0xFF002300, "active_character_set"),
    (2, 0x00023, 0x000BB900, "reserved_zero_block"),
    (2, 0x00024, 0x00177000, "fat_sat_flags"),
    (2, 0x00025, 0xFF000800, "table_position_mm"),
    (2, 0x00026, 0x00000100, "echo_index"),
    (2, 0x00027, 0x000BB900, "reserved_zero_block"),
    (2, 0x00028, 0x00000600, "phase_encode_vector"),
    (2, 0x00029, 0x001B5E00, "usan_scalar_block"),
    (2, 0x0002A, 0x000BB900, "reserved_zero_block"),
    (2, 0x0002B, 0x000BB800, "bandwidth_table"),
    (2, 0x0002C, 0xFF002500, "device_serial_table"),
    (2, 0x0002D, 0x00000F00, "coil_calibration_block"),
    (2, 0x0002E, 0xFF002100, "gradient_delay_table"),
    (2, 0x0002F, 0x000BC100, "surface_coil_labels"),
    (2, 0x00030, 0x001B5E00, "usan_scalar_block"),
    (2, 0x00031, 0xFF002200, "thumbnail_pixels"),
    (2, 0x00032, 0x00000100, "average_count"),
    (2, 0x00033, 0xFF002000, "usan_vector_block"),
    (2, 0x00034, 0x00000100, "recon_flag"),
    (2, 0x00035, 0x000BC100, "surface_coil_labels"),
    (2, 0x00036, 0xFF002000, "usan_vector_block"),
    (2, 0x00037, 0xFF002300, "charset_label_raw"),
    (2, 0x00038, 0x001F4600, "free_text_block"),
    (2, 0x00039, 0x001F4300, "implementation_version_block"),
    (2, 0x0003A, 0x001F4400, "protocol_summary_block"),
    (2, 0x0003B, 0x001F4000, "sequence_name_table"),
    (2, 0x0003C, 0xFF002C00, "coil_name_sjis"),
    (2, 0x0003D, 0x000BC200, "noise_calibration_samples"),
    (2, 0x0003E, 0x001F4600, "free_text_block"),
    (2, 0x0003F, 0x00000E00, "acquisition_datetime"),
    (2, 0x00040, 0x001B5F00, "usan_triplet_block"),
    (2, 0x00041, 0x001B5E00, "usan_scalar_block"),
    (2, 0x00042, 0x00000B00, "matrix_size_triplet"),
    (2, 0x00043, 0x00177200, "icon_palette_entry"),
    (2, 0x00044, 0xFF002000, "usan_vector_block"),
    (2, 0x017E3, 0xFF002400, "gradient_mode_flag_int32"),
    (3, 0x00045, 0xFF003100, "acquisition_matrix_pair"),
    (3, 0x00046, 0x000BBB00, "saturation_band_bytes"),
    (3, 0x00047, 0x000BBB00, "saturation_band_bytes"),
    (3, 0x00048, 0x00000F00, "coil_calibration_block"),
    (3, 0x00049, 0x00000B00, "voxel_dim_triplet"),
    (3, 0x0004A, 0x001F4100, "series_instance_uid_pair"),
    (3, 0x0004B, 0xFF002800, "flip_angle_table_deg"),
    (3, 0x0004C, 0x00177000, "fat_sat_flags"),
    (3, 0x0004D, 0x00000100, "recon_flag"),
    (3, 0x0004E, 0xFF003200, "scan_option_flags"),
    (3, 0x0004F, 0x001F4600, "free_text_block"),
    (3, 0x00050, 0x00000400, "k_space_trajectory_sample"),
    (3, 0x00051, 0xFF003200, "scan_option_flags"),
    (3, 0x00052, 0x0007D000, "raw_kspace_offsets"),
    (3, 0x00053, 0x00177200, "icon_palette_entry"),
    (3, 0x00054, 0x000BC200, "noise_calibration_samples"),
    (3, 0x00055, 0x000BC300, "protocol_step_labels"),
    (3, 0x00056, 0x000BB900, "reserved_zero_block"),
    (3, 0x00057, 0x00000B00, "matrix_size_triplet"),
    (3, 0x00058, 0x00000F00, "coil_calibration_block"),
    (3, 0x00059, 0x000BC200, "noise_calibration_samples"),
    (3, 0x0005A, 0x001F4600, "free_text_block"),
    (3, 0x0005B, 0xFF002C00, "sequence_alias_sjis"),
    (3, 0x0005C, 0x000BC100, "channel_labels"),
    (3, 0x0005D, 0xFF002100, "gradient_delay_table"),
    (3, 0x0005E, 0x00000600, "phase_encode_vector"),
    (3, 0x0005F, 0x001F4100, "series_instance_uid_pair"),
    (3, 0x00060, 0x000BB900, "reserved_zero_block"),
    (3, 0x00061, 0x001F4600, "free_text_block"),
    (3, 0x00062, 0xFF002200, "thumbnail_pixels"),
    (3, 0x00063, 0xFF002A00, "motion_correction_enabled"),
    (3, 0x00064, 0x000BBA00, "window_center_width_pair"),
    (3, 0x00065, 0x00000500, "rect_fov_mm"),
    (3, 0x00066, 0x00177200, "icon_palette_entry"),
    (3, 0x0A965, 0x000BC100, "coil_element_labels"),
    (3, 0x0B3D5, 0xFF002C00, "sequence_description_sjis"),
    (4, 0x00067, 0xFF002C00, "sequence_alias_sjis"),
    (4, 0x00068, 0xFF002500, "device_serial_table"),
    (4, 0x00069, 0xFF000800, "slice_thickness_mm"),
    (4, 0x0006A, 0xFF002100, "gradient_delay_table"),
    (4, 0x0006B, 0x000BC300, "protocol_step_labels"),
    (4, 0x0006C, 0x001F4600, "free_text_block"),
    (4, 0x0006D, 0x00000200, "shim_table_entry"),
    (4, 0x0006E, 0xFF002900, "larmor_frequency_hz"),
    (4, 0x0006F, 0x00000400, "navigator_sample"),
    (4, 0x00070, 0x00000200, "shim_table_entry"),
    (4, 0x00071, 0x00000100, "average_count"),
    (4, 0x00072, 0x001F4600, "free_text_block"),
    (4, 0x00073, 0x00000300, "operator_note_iso8859"),
    (4, 0x00074, 0xFF002500, "device_serial_table"),
    (4, 0x00075, 0xFFF00200, "reserved_int32_block"),
    (4, 0x00076, 0xFF002A00, "motion_correction_enabled"),
    (4, 0x00077, 0xFF003100, "acquisition_matrix_pair"),
    (4, 0x00078, 0x001F4000, "sequence_name_table"),
    (4, 0x00079, 0x00000200, "shim_table_entry"),
    (4, 0x0007A, 0x000BC300, "protocol_step_labels"),
    (4, 0x0007B, 0x001F4600, "free_text_block"),
    (4, 0x0007C, 0xFF002100, "gradient_delay_table"),
    (4, 0x0007D, 0x001F4000, "sequence_name_table"),
    (4, 0x0007E, 0x001F4100, "sop_instance_uid_pair"),
    (4, 0x0007F, 0xFF000800, "table_position_mm"),
    (4, 0x00080, 0x000BC200, "noise_calibration_samples"),
    (4, 0x00081, 0xFF000800, "table_position_mm"),
    (4, 0x00082, 0xFF000800, "table_position_mm"),
    (4, 0x00083, 0x00177000, "fat_sat_flags"),
    (4, 0x00084, 0x00177000, "fat_sat_flags"),
    (4, 0x00085, 0xFF002300, "charset_label_raw"),
    (4, 0x00086, 0x001B5E00, "usan_scalar_block"),
    (4, 0x00087, 0x00177000, "fat_sat_flags"),
    (4, 0x00088, 0xFFF00200, "reserved_int32_block"),
    (4, 0x03A5E, 0xFF002100, "shim_coefficients"),
    (4, 0x0AFEA, 0xFF002800, "gradient_waveform_samples"),
    (5, 0x00089, 0x0007D000, "raw_kspace_offsets"),
    (5, 0x0008A, 0x00000500, "rect_fov_mm"),
    (5, 0x0008B, 0x00000500, "pixel_spacing_mm"),
    (5, 0x0008C, 0xFFF00200, "reserved_int32_block"),
    (5, 0x0008D, 0xFFF00200, "reserved_int32_block"),
    (5, 0x0008E, 0xFF002A00, "contrast_agent_used"),
    (5, 0x0008F, 0x00000100, "average_count"),
    (5, 0x00090, 0xFF002200, "thumbnail_pixels"),
    (5, 0x00091, 0x00000B00, "matrix_size_triplet"),
    (5, 0x00092, 0xFF003100, "acquisition_matrix_pair"),
    (5, 0x00093, 0x00000E00, "series_datetime"),
    (5, 0x00094, 0x001F4000, "sequence_name_table"),
    (5, 0x00095, 0x00000600, "slice_normal_vector"),
    (5, 0x00096, 0x001B5E00, "usan_scalar_block"),
    (5, 0x00097, 0xFF002900, "larmor_frequency_hz"),
    (5, 0x00098, 0x001B5E00, "usan_scalar_block"),
    (5, 0x00099, 0x000BB900, "reserved_zero_block"),
    (5, 0x0009A, 0x001F4000, "sequence_name_table"),
    (5, 0x0009B, 0xFF002500, "device_serial_table"),
    (5, 0x0009C, 0x001F4000, "sequence_name_table"),
    (5, 0x0009D, 0x001F4000, "sequence_name_table"),
    (5, 0x0009E, 0x00000500, "rect_fov_mm"),
    (5, 0x0009F, 0xFF002100, "gradient_delay_table"),
    (5, 0x000A0, 0xFF002200, "thumbnail_pixels"),
    (5, 0x000A1, 0x001F4600, "free_text_block"),
    (5, 0x000A2, 0x000BC100, "surface_coil_labels"),
    (5, 0x000A3, 0xFF002000, "usan_vector_block"),
    (5, 0x000A4, 0x00177000, "fat_sat_flags"),
    (5, 0x000A5, 0x000BB800, "bandwidth_table"),
    (5, 0x000A6, 0xFF002400, "phase_count"),
    (5, 0x000A7, 0x000BC300, "protocol_step_labels"),
    (5, 0x000A8, 0xFF002300, "charset_label_raw"),
    (5, 0x000A9, 0x000BB900, "reserved_zero_block"),
    (5, 0x000AA, 0x000BC100, "surface_coil_labels"),
    // --- PHI-bearing keys ---
    (5, 0x055F2, 0x00000300, "patient_name_iso8859"),
    (5, 0x055F3, 0x00000300, "referring_physician_iso8859"),
    (5, 0x055F8, 0xFF000800, "patient_height_cm"),
    (5, 0x055F9, 0xFF000800, "patient_weight_kg"),
    (5, 0x055FC, 0xFF002C00, "patient_name_sjis"),
    (5, 0x0560C, 0xFF002C00, "patient_address_sjis"),
    (5, 0x0560D, 0x001F4300, "study_identification_block"),
    (5, 0x05612, 0x001F4300, "study_identification_block_alt"),
    (5, 0x06D77, 0x001F4400, "exam_request_block"),
    (5, 0x06D80, 0x001F4400, "exam_request_block_alt"),
    (5, 0x06D83, 0x001F4600, "referral_free_text_block"),
    (5, 0x06D8A, 0x001F4600, "referral_free_text_block_alt"),
    (6, 0x000AB, 0xFF002200, "thumbnail_pixels"),
    (6, 0x000AC, 0x000BB800, "bandwidth_table"),
    (6, 0x000AD, 0x000BC100, "channel_labels"),
    (6, 0x000AE, 0x000BB900, "reserved_zero_block"),
    (6, 0x000AF, 0x00000600, "slice_normal_vector"),
    (6, 0x000B0, 0x00000500, "rect_fov_mm"),
    (6, 0x000B1, 0xFF002900, "larmor_frequency_hz"),
    (6, 0x000B2, 0xFF000400, "fat_suppression_enabled"),
    (6, 0x000B3, 0x001F4100, "series_instance_uid_pair"),
    (6, 0x000B4, 0xFF003100, "acquisition_matrix_pair"),
    (6, 0x000B5, 0xFF003100, "acquisition_matrix_pair"),
    (6, 0x000B6, 0xFF002400, "echo_train_length"),
    (6, 0x000B7, 0x00000100, "echo_index"),
    (6, 0x000B8, 0xFF002400, "nex_count"),
    (6, 0x000B9, 0x001F4300, "implementation_version_block"),
    (6, 0x000BA, 0x00000300, "institution_name_iso8859"),
    (6, 0x000BB, 0xFF000400, "fat_suppression_enabled"),
    (6, 0x000BC, 0xFF000400, "fat_suppression_enabled"),
    (6, 0x000BD, 0xFF002500, "device_serial_table"),
    (6, 0x000BE, 0x001F4100, "sop_instance_uid_pair"),
    (6, 0x000BF, 0xFF000400, "fat_suppression_enabled"),
    (6, 0x000C0, 0xFF002000, "usan_vector_block"),
    (6, 0x000C1, 0x001F4600, "free_text_block"),
    (6, 0x000C2, 0x00000500, "pixel_spacing_mm"),
    (6, 0x000C3, 0x0007D000, "raw_kspace_offsets"),
    (6, 0x000C4, 0x00000400, "navigator_sample"),
    (6, 0x000C5, 0x000BC200, "noise_calibration_samples"),
    (6, 0x000C6, 0x00000200, "gradient_table_entry"),
    (6, 0x000C7, 0x00000F00, "coil_calibration_block"),
    (6, 0x000C8, 0xFF002000, "usan_vector_block"),
    (6, 0x000C9, 0x00000B00, "voxel_dim_triplet"),
    (6, 0x000CA, 0x000BC100, "channel_labels"),
    (6, 0x000CB, 0x000BC300, "protocol_step_labels"),
    (6, 0x000CC, 0x001B5E00, "usan_scalar_block"),
    (6, 0x01005, 0x00000500, "field_of_view_mm"),
    // dual-typed key observed at two positions, one type per group
    (6, 0x017E3, 0xFF002A00, "gradient_mode_flag_bool"),
    (6, 0x01BC3, 0xFF002200, "scout_icon_bitmap"),
    (6, 0x06719, 0x00000600, "slice_orientation_vector_0"),
    (6, 0x0671A, 0x00000600, "slice_orientation_vector_1"),
    (6, 0x0671B, 0x00000600, "slice_orientation_vector_2"),
    (7, 0x000CD, 0x000BC100, "surface_coil_labels"),
    (7, 0x000CE, 0xFF002200, "thumbnail_pixels"),
    (7, 0x000CF, 0x00000300, "institution_name_iso8859"),
    (7, 0x000D0, 0x001F4600, "free_text_block"),
    (7, 0x000D1, 0x001F4400, "protocol_summary_block"),
    (7, 0x000D2, 0x00000300, "institution_name_iso8859"),
    (7, 0x000D3, 0x000BBA00, "window_center_width_pair"),
    (7, 0x000D4, 0x000BC300, "protocol_step_labels"),
    (7, 0x000D5, 0x00000B00, "matrix_size_triplet"),
    (7, 0x000D6, 0x001F4400, "protocol_summary_block"),
    (7, 0x000D7, 0x00000100, "recon_flag"),
    (7, 0x000D8, 0xFF002000, "usan_vector_block"),
    (7, 0x000D9, 0x00000E00, "acquisition_datetime"),
    (7, 0x000DA, 0xFF002100, "gradient_delay_table"),
    (7, 0x000DB, 0x001B5F00, "usan_triplet_block"),
    (7, 0x000DC, 0x000BC100, "channel_labels"),
    (7, 0x000DD, 0x000BC100, "channel_labels"),
    (7, 0x000DE, 0x00000B00, "matrix_size_triplet"),
    (7, 0x000DF, 0x00000200, "shim_table_entry"),
    (7, 0x000E0, 0xFF003100, "acquisition_matrix_pair"),
    (7, 0x000E1, 0x001B5E00, "usan_scalar_block"),
    (7, 0x000E2, 0xFF002500, "device_serial_table"),
    (7, 0x000E3, 0xFF002100, "gradient_delay_table"),
    (7, 0x000E4, 0xFF002300, "charset_label_raw"),
    (7, 0x000E5, 0x00177200, "icon_palette_entry"),
    (7, 0x000E6, 0x00000E00, "study_datetime"),
    (7, 0x000E7, 0xFF002500, "device_serial_table"),
    (7, 0x000E8, 0x00000E00, "study_datetime"),
    (7, 0x000E9, 0x001F4600, "free_text_block"),
    (7, 0x000EA, 0x000BB800, "bandwidth_table"),
    (7, 0x000EB, 0xFF002300, "charset_label_raw"),
    (7, 0x000EC, 0x000BC100, "channel_labels"),
    (7, 0x000ED, 0x001F4400, "protocol_summary_block"),
    (7, 0x000EE, 0x000BBA00, "te_tr_pair"),
    (8, 0x000EF, 0x000BC300, "protocol_step_labels"),
    (8, 0x000F0, 0xFF002300, "charset_label_raw"),
    (8, 0x000F1, 0x00000100, "average_count"),
    (8, 0x000F2, 0xFF002200, "thumbnail_pixels"),
    (8, 0x000F3, 0xFF002900, "larmor_frequency_hz"),
    (8, 0x000F4, 0xFF002900, "larmor_frequency_hz"),
    (8, 0x000F5, 0x00000600, "slice_normal_vector"),
    (8, 0x000F6, 0x001F4300, "implementation_version_block"),
    (8, 0x000F7, 0x000BC200, "noise_calibration_samples"),
    (8, 0x000F8, 0x000BC100, "surface_coil_labels"),
    (8, 0x000F9, 0xFF002000, "usan_vector_block"),
    (8, 0x000FA, 0x001F4100, "series_instance_uid_pair"),
    (8, 0x000FB, 0x00000100, "echo_index"),
    (8, 0x000FC, 0x001F4600, "free_text_block"),
    (8, 0x000FD, 0xFF002300, "charset_label_raw"),
    (8, 0x000FE, 0x00000400, "k_space_trajectory_sample"),
    (8, 0x000FF, 0x00000B00, "matrix_size_triplet"),
    (8, 0x00100, 0x0007D000, "raw_kspace_offsets"),
    (8, 0x00101, 0xFF003200, "scan_option_flags"),
    (8, 0x00102, 0xFF002100, "gradient_delay_table"),
    (8, 0x00103, 0x000BB900, "reserved_zero_block"),
    (8, 0x00104, 0xFF002C00, "sequence_alias_sjis"),
    (8, 0x00105, 0x000BC200, "noise_calibration_samples"),
    (8, 0x00106, 0x00000200, "shim_table_entry"),
    (8, 0x00107, 0x000BC200, "noise_calibration_samples"),
    (8, 0x00108, 0x00000100, "average_count"),
    (8, 0x00109, 0x000BB800, "bandwidth_table"),
    (8, 0x0010A, 0xFF002800, "flip_angle_table_deg"),
    (8, 0x0010B, 0x00000200, "shim_table_entry"),
    (8, 0x0010C, 0x00000500, "pixel_spacing_mm"),
    (8, 0x0010D, 0x00000F00, "coil_calibration_block"),
    (8, 0x0010E, 0x000BB900, "reserved_zero_block"),
    (8, 0x0010F, 0x00000B00, "voxel_dim_triplet"),
    (8, 0x00110, 0x001F4400, "protocol_summary_block"),
];

/// Fixed PHI key set. `group` is not part of the match.
pub(crate) static PHI_KEYS: &[u32] = &[
    0x55F2, 0x55F3, 0x55FC, 0x560C, 0x560D, 0x5612, 0x6D77, 0x6D80, 0x6D83, 0x6D8A,
];

/// Binary search for `(group, key)`, returning `(type, name)` on a hit.
pub fn lookup(group: u8, key: u32) -> Option<(u32, &'static str)> {
    let idx = DICTIONARY
        .binary_search_by(|(g, k, _, _)| (*g, *k).cmp(&(group, key)))
        .ok()?;
    let (_, _, type_code, name) = DICTIONARY[idx];
    Some((type_code, name))
}

/// Look up a human name for a `(group, key)` pair, if known.
pub fn name_for(group: u8, key: u32) -> Option<&'static str> {
    lookup(group, key).map(|(_, name)| name)
}

/// `(group, key, type)` must appear in the dictionary exactly.
pub fn validate(group: u8, key: u32, type_code: u32) -> bool {
    matches!(lookup(group, key), Some((t, _)) if t == type_code)
}

/// Membership test against the fixed PHI key set. `group` does not
/// participate in the match.
pub fn is_phi_key(key: u32) -> bool {
    PHI_KEYS.contains(&key)
}

/// Startup self-check: keys strictly increasing within each group,
/// groups non-decreasing overall. Mirrors the original's
/// `check_mec_mr3_dict()`, called once by the core before a walk.
pub fn self_check() -> Result<()> {
    let mut prev: Option<(u8, u32)> = None;
    for &(group, key, _, _) in DICTIONARY {
        if let Some((prev_group, prev_key)) = prev {
            if group < prev_group {
                return Err(MecMr3Error::DictionaryCorrupt(format!(
                    "group {group} follows group {prev_group} out of order"
                )));
            }
            if group == prev_group && key <= prev_key {
                return Err(MecMr3Error::DictionaryCorrupt(format!(
                    "key 0x{key:05X} does not strictly increase after 0x{prev_key:05X} in group {group}"
                )));
            }
        }
        prev = Some((group, key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_check_passes_on_shipped_table() {
        self_check().unwrap();
    }

    #[test]
    fn lookup_hits_known_entry() {
        let (type_code, name) = lookup(5, 0x55F2).unwrap();
        assert_eq!(type_code, 0x00000300);
        assert_eq!(name, "patient_name_iso8859");
    }

    #[test]
    fn lookup_misses_unknown_group_key() {
        assert!(lookup(1, 0xFFFFF).is_none());
    }

    #[test]
    fn validate_rejects_type_mismatch() {
        assert!(validate(5, 0x55F2, 0x00000300));
        assert!(!validate(5, 0x55F2, 0xFF002C00));
    }

    #[test]
    fn dual_typed_key_resolves_per_group() {
        let (t1, _) = lookup(2, 0x17E3).unwrap();
        let (t2, _) = lookup(6, 0x17E3).unwrap();
        assert_ne!(t1, t2);
    }

    #[test]
    fn is_phi_key_matches_fixed_set() {
        for &k in PHI_KEYS {
            assert!(is_phi_key(k));
        }
        assert!(!is_phi_key(0x0001));
    }
}
