// SSD1306 command definitions

pub const SET_CONTRAST: u8 = 0x81; // Contrast control
pub const SET_ENTIRE_ON: u8 = 0xA4; // Output follows RAM contents
pub const SET_NORM_INV: u8 = 0xA6; // Normal/inverse display
pub const SET_DISP: u8 = 0xAE; // Display on/off (low bit)
pub const SET_MEM_ADDR: u8 = 0x20; // Memory addressing mode
pub const SET_COL_ADDR: u8 = 0x21; // Column address window
pub const SET_PAGE_ADDR: u8 = 0x22; // Page address window
pub const SET_DISP_START_LINE: u8 = 0x40; // Display start line (low 6 bits)
pub const SET_SEG_REMAP: u8 = 0xA0; // Segment remap (low bit)
pub const SET_MUX_RATIO: u8 = 0xA8; // Multiplex ratio
pub const SET_COM_OUT_DIR: u8 = 0xC0; // COM output scan direction
pub const SET_DISP_OFFSET: u8 = 0xD3; // Display offset
pub const SET_COM_PIN_CFG: u8 = 0xDA; // COM pins hardware configuration
pub const SET_DISP_CLK_DIV: u8 = 0xD5; // Display clock divide ratio
pub const SET_PRECHARGE: u8 = 0xD9; // Pre-charge period
pub const SET_VCOM_DESEL: u8 = 0xDB; // VCOMH deselect level
pub const SET_CHARGE_PUMP: u8 = 0x8D; // Charge pump setting

// ILI9341 command definitions

pub const ILI_SLPOUT: u8 = 0x11; // Sleep out
pub const ILI_INVOFF: u8 = 0x20; // Display inversion off
pub const ILI_INVON: u8 = 0x21; // Display inversion on
pub const ILI_DISPOFF: u8 = 0x28; // Display off
pub const ILI_DISPON: u8 = 0x29; // Display on
pub const ILI_CASET: u8 = 0x2A; // Column address set
pub const ILI_PASET: u8 = 0x2B; // Page (row) address set
pub const ILI_RAMWR: u8 = 0x2C; // Memory write

// ILI9341 bring-up sequence (command, parameter bytes), taken from the
// ODROID-GO panel configuration. MADCTL 0xA8 gives the landscape
// orientation the games expect; PIXSET 0x55 selects 16-bit RGB565.
pub const ILI_INIT: &[(u8, &[u8])] = &[
    (0xD9, &[0x03, 0x80, 0x02]),                   // read display self-diagnostic
    (0xCF, &[0x00, 0xCF, 0x30]),                   // power control B
    (0xED, &[0x64, 0x03, 0x12, 0x81]),             // power on sequence control
    (0xE8, &[0x85, 0x00, 0x78]),                   // driver timing control A
    (0xCB, &[0x39, 0x2C, 0x00, 0x34, 0x02]),       // power control A
    (0xF7, &[0x20]),                               // pump ratio control
    (0xEA, &[0x00, 0x00]),                         // driver timing control B
    (0xC0, &[0x1B]),                               // power control 1
    (0xC1, &[0x12]),                               // power control 2
    (0xC5, &[0x3E, 0x3C]),                         // VCOM control 1
    (0xC7, &[0x91]),                               // VCOM control 2
    (0x36, &[0xA8]),                               // memory access control
    (0x3A, &[0x55]),                               // pixel format set
    (0xB1, &[0x00, 0x1B]),                         // frame rate control
    (0xB6, &[0x0A, 0xA2, 0x27]),                   // display function control
    (0xF6, &[0x01, 0x30]),                         // interface control
    (0xF2, &[0x00]),                               // enable 3G gamma
    (0x26, &[0x01]),                               // gamma set
    (
        0xE0,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    ), // positive gamma correction
    (
        0xE1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    ), // negative gamma correction
];
