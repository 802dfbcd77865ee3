mod next_reset_time;

use super::wib;
